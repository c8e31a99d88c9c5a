pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::api::{create_router, AppState};
pub use crate::core::{oracle::LoadedArtifacts, service::PredictionService};
pub use crate::utils::error::{Result, ServiceError};
