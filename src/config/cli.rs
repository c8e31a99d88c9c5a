use crate::config::toml_config::TomlConfig;
use crate::domain::model::PredictRequest;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "edu-access")]
#[command(about = "Education access prediction service for disabled people")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Run one prediction and print the JSON response
    Predict(PredictArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Path to the JSON artifact bundle")]
    pub artifacts: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    #[arg(long, default_value = "./artifacts/bundle.json")]
    pub artifacts: String,

    #[arg(long)]
    pub sex: String,

    #[arg(long)]
    pub age: String,

    #[arg(long = "hlth-pb")]
    pub hlth_pb: String,

    #[arg(long)]
    pub isced97: String,

    #[arg(long)]
    pub geo: String,

    #[arg(long)]
    pub time: i64,
}

impl ServeArgs {
    /// 預設值 → TOML 檔案 → 命令列參數，後者覆蓋前者
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(artifacts) = &self.artifacts {
            config.artifacts.path = artifacts.clone();
        }

        Ok(config)
    }
}

impl PredictArgs {
    pub fn to_request(&self) -> PredictRequest {
        PredictRequest {
            sex: self.sex.clone(),
            age: self.age.clone(),
            hlth_pb: self.hlth_pb.clone(),
            isced97: self.isced97.clone(),
            geo: self.geo.clone(),
            time: self.time,
        }
    }
}
