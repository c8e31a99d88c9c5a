use crate::core::encoder::FeatureEncoder;
use crate::core::oracle::LoadedArtifacts;
use crate::core::{adjustment, advisory, classifier, validator};
use crate::domain::model::{AccessPrediction, AccessRequest, PredictRequest, UNIT_THOUSANDS};
use crate::domain::ports::Regressor;
use crate::utils::error::Result;
use std::sync::Arc;

/// Validate → encode → predict → adjust → classify → advise.
///
/// Holds only read-only artifacts, so one instance is shared by every request.
#[derive(Clone)]
pub struct PredictionService {
    encoder: Arc<FeatureEncoder>,
    regressor: Arc<dyn Regressor>,
}

impl PredictionService {
    pub fn new(encoder: FeatureEncoder, regressor: Arc<dyn Regressor>) -> Self {
        Self {
            encoder: Arc::new(encoder),
            regressor,
        }
    }

    pub fn from_artifacts(artifacts: LoadedArtifacts) -> Self {
        Self::new(artifacts.encoder, Arc::new(artifacts.oracle))
    }

    pub fn predict(&self, raw: &PredictRequest) -> Result<AccessPrediction> {
        let request = validator::validate_request(raw)?;
        self.predict_validated(&request)
    }

    /// Entry point for an untyped request body.
    pub fn predict_json(&self, body: &serde_json::Value) -> Result<AccessPrediction> {
        let request = validator::validate_json(body)?;
        self.predict_validated(&request)
    }

    pub fn predict_validated(&self, request: &AccessRequest) -> Result<AccessPrediction> {
        let features = self.encoder.encode(request)?;
        tracing::debug!("Encoded features: {:?}", features);

        let raw_prediction = self.regressor.predict(&features)?;
        let country = request.country.as_str();
        let adjusted = adjustment::adjust(raw_prediction, country);
        let level = classifier::classify(adjusted.prediction);

        tracing::info!(
            geo = country,
            raw = raw_prediction,
            predicted = adjusted.prediction,
            level = level.label(),
            "Prediction completed"
        );

        Ok(AccessPrediction {
            predicted_access: adjusted.prediction,
            european_baseline: adjusted.baseline,
            african_adjustment_factor: adjusted.factor,
            access_level: level,
            access_description: level.description().to_string(),
            african_recommendation: advisory::recommendation(request, adjusted.prediction),
            policy_suggestion: advisory::policy_suggestion(country, adjusted.prediction),
            unit: UNIT_THOUSANDS.to_string(),
        })
    }
}
