use crate::domain::model::AccessRequest;
use crate::domain::ports::EncodedFeatures;
use crate::domain::region::{is_target_country, ENCODING_REFERENCE_COUNTRY};
use crate::utils::error::InferenceError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted vocabularies, one ordered class list per categorical column.
/// A category's code is its position in the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderTables {
    pub sex: Vec<String>,
    pub age: Vec<String>,
    pub hlth_pb: Vec<String>,
    pub isced97: Vec<String>,
    pub geo: Vec<String>,
}

#[derive(Debug, Clone)]
struct LabelTable {
    field: &'static str,
    codes: HashMap<String, u32>,
}

impl LabelTable {
    fn build(field: &'static str, classes: &[String]) -> Result<Self, InferenceError> {
        if classes.is_empty() {
            return Err(InferenceError::Artifact {
                message: format!("encoder '{}' has no classes", field),
            });
        }

        let mut codes = HashMap::with_capacity(classes.len());
        for (idx, class) in classes.iter().enumerate() {
            // 國家代碼在訓練資料裡可能帶有尾端空白
            let key = class.trim().to_string();
            if codes.insert(key, idx as u32).is_some() {
                return Err(InferenceError::Artifact {
                    message: format!("encoder '{}' has duplicate class '{}'", field, class),
                });
            }
        }

        Ok(Self { field, codes })
    }

    fn encode(&self, value: &str) -> Result<u32, InferenceError> {
        self.codes
            .get(value.trim())
            .copied()
            .ok_or_else(|| InferenceError::Encoding {
                field: self.field.to_string(),
                value: value.to_string(),
            })
    }

    fn len(&self) -> usize {
        self.codes.len()
    }
}

#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    sex: LabelTable,
    age: LabelTable,
    hlth_pb: LabelTable,
    isced97: LabelTable,
    geo: LabelTable,
}

impl FeatureEncoder {
    pub fn from_tables(tables: &EncoderTables) -> Result<Self, InferenceError> {
        let encoder = Self {
            sex: LabelTable::build("sex", &tables.sex)?,
            age: LabelTable::build("age", &tables.age)?,
            hlth_pb: LabelTable::build("hlth_pb", &tables.hlth_pb)?,
            isced97: LabelTable::build("isced97", &tables.isced97)?,
            geo: LabelTable::build("geo", &tables.geo)?,
        };

        // 非洲國家要借用參考國家的代碼，所以它必須在詞彙表裡
        encoder.geo.encode(ENCODING_REFERENCE_COUNTRY).map_err(|_| {
            InferenceError::Artifact {
                message: format!(
                    "geo encoder does not contain reference country '{}'",
                    ENCODING_REFERENCE_COUNTRY
                ),
            }
        })?;

        Ok(encoder)
    }

    /// Country value the model actually sees for this request.
    pub fn model_country(country: &str) -> &str {
        if is_target_country(country) {
            ENCODING_REFERENCE_COUNTRY
        } else {
            country
        }
    }

    pub fn encode(&self, request: &AccessRequest) -> Result<EncodedFeatures, InferenceError> {
        let geo_value = Self::model_country(request.country.as_str());
        Ok(EncodedFeatures {
            sex: self.sex.encode(request.sex.code())?,
            age: self.age.encode(request.age.code())?,
            hlth_pb: self.hlth_pb.encode(request.category.code())?,
            isced97: self.isced97.encode(request.education.code())?,
            geo: self.geo.encode(geo_value)?,
            time: request.year,
        })
    }

    pub fn vocabulary_sizes(&self) -> [(&'static str, usize); 5] {
        [
            (self.sex.field, self.sex.len()),
            (self.age.field, self.age.len()),
            (self.hlth_pb.field, self.hlth_pb.len()),
            (self.isced97.field, self.isced97.len()),
            (self.geo.field, self.geo.len()),
        ]
    }
}
