use crate::core::ConfigProvider;
use crate::utils::error::{Result, ServiceError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_artifacts_path")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_artifacts_path() -> String {
    "./artifacts/bundle.json".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            path: default_artifacts_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: default_log_format(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ServiceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EDU_ACCESS_ARTIFACTS})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.logging.format).unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn artifacts_path(&self) -> &str {
        &self.artifacts.path
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_range("server.port", self.server.port, 1, u16::MAX)?;
        validate_path("artifacts.path", &self.artifacts.path)?;

        if self.artifacts.path.contains("${") {
            return Err(ServiceError::InvalidConfigValueError {
                field: "artifacts.path".to_string(),
                value: self.artifacts.path.clone(),
                reason: "Unresolved environment variable".to_string(),
            });
        }

        validate_one_of("logging.format", &self.logging.format, &["compact", "text", "json"])?;
        if let Some(level) = &self.logging.level {
            validate_one_of(
                "logging.level",
                level,
                &["trace", "debug", "info", "warn", "error"],
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "127.0.0.1"
port = 9000

[artifacts]
path = "/srv/models/bundle.json"

[logging]
level = "debug"
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.artifacts_path(), "/srv/models/bundle.json");
        assert_eq!(config.log_format(), LogFormat::Json);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.port(), 8000);
        assert_eq!(config.artifacts_path(), "./artifacts/bundle.json");
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("EDU_ACCESS_TEST_BUNDLE", "/tmp/test-bundle.json");

        let toml_content = r#"
[artifacts]
path = "${EDU_ACCESS_TEST_BUNDLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.artifacts_path(), "/tmp/test-bundle.json");

        std::env::remove_var("EDU_ACCESS_TEST_BUNDLE");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[artifacts]
path = "${EDU_ACCESS_SURELY_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[server]
port = 0

[logging]
format = "xml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = ").unwrap_err();
        assert!(matches!(err, ServiceError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
port = 8123
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.port(), 8123);
    }
}
