use serde::Serialize;
use thiserror::Error;

/// 單一欄位的驗證問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub value: String,
    pub reason: String,
}

/// Request rejected before it reaches the encoder. Carries every offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for {}", self.field_names().join(", "))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn single(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.to_string(),
                value: value.into(),
                reason: reason.into(),
            }],
        }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("unknown value '{value}' for field '{field}'")]
    Encoding { field: String, value: String },

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("model produced a non-finite value: {0}")]
    NonFinite(f64),

    #[error("invalid model artifact: {message}")]
    Artifact { message: String },
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Prediction error: {0}")]
    Inference(#[from] InferenceError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫端的輸入有誤
    Client,
    /// 模型或編碼階段失敗
    Inference,
    /// 啟動階段 (設定、模型檔) 失敗
    Startup,
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::Validation(_) => ErrorCategory::Client,
            ServiceError::Inference(_) => ErrorCategory::Inference,
            ServiceError::IoError(_)
            | ServiceError::SerializationError(_)
            | ServiceError::ConfigError { .. }
            | ServiceError::InvalidConfigValueError { .. } => ErrorCategory::Startup,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Client => 2,
            ErrorCategory::Inference => 1,
            ErrorCategory::Startup => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
