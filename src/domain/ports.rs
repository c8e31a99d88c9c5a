use crate::utils::error::InferenceError;

/// Number of model inputs: sex, age, hlth_pb, isced97, geo, time.
pub const FEATURE_COUNT: usize = 6;

/// Label-encoded request, in the column order the model was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedFeatures {
    pub sex: u32,
    pub age: u32,
    pub hlth_pb: u32,
    pub isced97: u32,
    pub geo: u32,
    pub time: u16,
}

impl EncodedFeatures {
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.sex),
            f64::from(self.age),
            f64::from(self.hlth_pb),
            f64::from(self.isced97),
            f64::from(self.geo),
            f64::from(self.time),
        ]
    }
}

/// Point prediction over encoded features. Implementations must be pure.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &EncodedFeatures) -> Result<f64, InferenceError>;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn artifacts_path(&self) -> &str;
}
