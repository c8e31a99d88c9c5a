//! Pre-fitted scaler and regression model behind the [`Regressor`] port.
//!
//! Artifacts are read once from a JSON bundle at startup and never mutated.

use crate::core::encoder::{EncoderTables, FeatureEncoder};
use crate::domain::ports::{EncodedFeatures, Regressor, FEATURE_COUNT};
use crate::utils::error::{InferenceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Centers and scales each column with the statistics seen at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    fn check(&self) -> std::result::Result<(), InferenceError> {
        if self.mean.len() != FEATURE_COUNT {
            return Err(InferenceError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: self.mean.len(),
            });
        }
        if self.scale.len() != FEATURE_COUNT {
            return Err(InferenceError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: self.scale.len(),
            });
        }
        if let Some(bad) = self
            .scale
            .iter()
            .chain(self.mean.iter())
            .find(|v| !v.is_finite())
        {
            return Err(InferenceError::Artifact {
                message: format!("scaler contains non-finite value {}", bad),
            });
        }
        if self.scale.iter().any(|s| *s == 0.0) {
            return Err(InferenceError::Artifact {
                message: "scaler has a zero scale entry".to_string(),
            });
        }
        Ok(())
    }

    pub fn transform(&self, input: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (i, value) in input.iter().enumerate() {
            out[i] = (value - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// One regression tree in flattened node-array form. A node is a leaf when
/// `left[node] == -1`; otherwise go left when `x[feature] <= threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub left: Vec<i64>,
    pub right: Vec<i64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    fn check(&self) -> std::result::Result<(), InferenceError> {
        let n = self.value.len();
        if n == 0 {
            return Err(InferenceError::Artifact {
                message: "tree has no nodes".to_string(),
            });
        }
        if [
            self.feature.len(),
            self.threshold.len(),
            self.left.len(),
            self.right.len(),
        ]
        .iter()
        .any(|len| *len != n)
        {
            return Err(InferenceError::Artifact {
                message: "tree node arrays differ in length".to_string(),
            });
        }

        for node in 0..n {
            if self.left[node] == -1 {
                continue;
            }
            let children_ok = [self.left[node], self.right[node]]
                .iter()
                .all(|c| *c > node as i64 && (*c as usize) < n);
            let feature_ok =
                self.feature[node] >= 0 && (self.feature[node] as usize) < FEATURE_COUNT;
            if !children_ok || !feature_ok {
                return Err(InferenceError::Artifact {
                    message: format!("tree node {} has out-of-range indices", node),
                });
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut node = 0usize;
        // 檢查過子節點索引一定往後走，迴圈必定結束
        while self.left[node] != -1 {
            let feature = self.feature[node] as usize;
            node = if x[feature] <= self.threshold[node] {
                self.left[node] as usize
            } else {
                self.right[node] as usize
            };
        }
        self.value[node]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest style.
    Mean,
    /// Gradient boosting style.
    Sum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    TreeEnsemble {
        aggregation: Aggregation,
        #[serde(default)]
        base_score: f64,
        trees: Vec<RegressionTree>,
    },
}

impl RegressionModel {
    fn check(&self) -> std::result::Result<(), InferenceError> {
        match self {
            RegressionModel::Linear { coefficients, .. } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(InferenceError::FeatureCount {
                        expected: FEATURE_COUNT,
                        actual: coefficients.len(),
                    });
                }
                Ok(())
            }
            RegressionModel::TreeEnsemble { trees, .. } => {
                if trees.is_empty() {
                    return Err(InferenceError::Artifact {
                        message: "tree ensemble has no trees".to_string(),
                    });
                }
                trees.iter().try_for_each(RegressionTree::check)
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RegressionModel::Linear { .. } => "linear",
            RegressionModel::TreeEnsemble { .. } => "tree_ensemble",
        }
    }

    pub fn predict(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        match self {
            RegressionModel::Linear {
                coefficients,
                intercept,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(x.iter())
                        .map(|(c, v)| c * v)
                        .sum::<f64>()
            }
            RegressionModel::TreeEnsemble {
                aggregation,
                base_score,
                trees,
            } => {
                let total: f64 = trees.iter().map(|t| t.predict(x)).sum();
                match aggregation {
                    Aggregation::Mean => base_score + total / trees.len() as f64,
                    Aggregation::Sum => base_score + total,
                }
            }
        }
    }
}

/// Scaler followed by model.
#[derive(Debug, Clone)]
pub struct RegressionOracle {
    scaler: StandardScaler,
    model: RegressionModel,
}

impl RegressionOracle {
    pub fn new(
        scaler: StandardScaler,
        model: RegressionModel,
    ) -> std::result::Result<Self, InferenceError> {
        scaler.check()?;
        model.check()?;
        Ok(Self { scaler, model })
    }

    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }
}

impl Regressor for RegressionOracle {
    fn predict(&self, features: &EncodedFeatures) -> std::result::Result<f64, InferenceError> {
        let scaled = self.scaler.transform(&features.to_vector());
        let value = self.model.predict(&scaled);
        if !value.is_finite() {
            return Err(InferenceError::NonFinite(value));
        }
        Ok(value)
    }
}

/// On-disk layout of the fitted artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub encoders: EncoderTables,
    pub scaler: StandardScaler,
    pub model: RegressionModel,
}

/// Encoder and oracle ready to serve.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub encoder: FeatureEncoder,
    pub oracle: RegressionOracle,
}

impl ArtifactBundle {
    /// 從 JSON 檔案載入模型、縮放器與編碼器
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn into_loaded(self) -> Result<LoadedArtifacts> {
        let encoder = FeatureEncoder::from_tables(&self.encoders)?;
        let oracle = RegressionOracle::new(self.scaler, self.model)?;
        Ok(LoadedArtifacts { encoder, oracle })
    }
}

impl LoadedArtifacts {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading model artifacts from {}", path.display());
        let loaded = ArtifactBundle::from_file(path)?.into_loaded()?;

        tracing::info!(
            "📦 Artifacts ready: model={}, vocabularies={:?}",
            loaded.oracle.model_kind(),
            loaded.encoder.vocabulary_sizes()
        );
        Ok(loaded)
    }
}
