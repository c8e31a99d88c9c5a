pub mod adjustment;
pub mod advisory;
pub mod classifier;
pub mod encoder;
pub mod oracle;
pub mod service;
pub mod validator;

pub use crate::domain::model::{AccessPrediction, AccessRequest, PredictRequest};
pub use crate::domain::ports::{ConfigProvider, EncodedFeatures, Regressor};
pub use crate::utils::error::Result;
