use crate::domain::model::{
    AccessRequest, AgeBand, CountryCode, DisabilityCategory, EducationLevel, PredictRequest, Sex,
    MAX_YEAR, MIN_YEAR,
};
use crate::utils::error::{FieldIssue, ValidationError};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,3}$").expect("static regex"));

fn check_enum<T>(
    issues: &mut Vec<FieldIssue>,
    field: &str,
    value: Option<&str>,
    parse: fn(&str) -> Option<T>,
    allowed: Vec<&'static str>,
) -> Option<T> {
    let value = value?;
    let parsed = parse(value);
    if parsed.is_none() {
        issues.push(FieldIssue {
            field: field.to_string(),
            value: value.to_string(),
            reason: format!("must be one of: {}", allowed.join(", ")),
        });
    }
    parsed
}

/// Checks every field and reports all violations at once.
pub fn validate_request(raw: &PredictRequest) -> Result<AccessRequest, ValidationError> {
    let fields = RawFields {
        sex: Some(raw.sex.as_str()),
        age: Some(raw.age.as_str()),
        hlth_pb: Some(raw.hlth_pb.as_str()),
        isced97: Some(raw.isced97.as_str()),
        geo: Some(raw.geo.as_str()),
        time: Some(raw.time),
    };
    fields.validate(Vec::new())
}

/// Same checks as [`validate_request`], applied to an untyped JSON body.
///
/// Missing and mistyped fields are reported next to the enum and range
/// violations, one issue per field.
pub fn validate_json(body: &Value) -> Result<AccessRequest, ValidationError> {
    let Some(object) = body.as_object() else {
        return Err(ValidationError::single(
            "body",
            body.to_string(),
            "must be a JSON object",
        ));
    };

    let mut issues = Vec::new();
    let fields = RawFields {
        sex: string_field(&mut issues, object, "sex"),
        age: string_field(&mut issues, object, "age"),
        hlth_pb: string_field(&mut issues, object, "hlth_pb"),
        isced97: string_field(&mut issues, object, "isced97"),
        geo: string_field(&mut issues, object, "geo"),
        time: integer_field(&mut issues, object, "time"),
    };
    fields.validate(issues)
}

fn present<'a>(
    issues: &mut Vec<FieldIssue>,
    object: &'a Map<String, Value>,
    field: &str,
) -> Option<&'a Value> {
    match object.get(field) {
        Some(Value::Null) | None => {
            issues.push(FieldIssue {
                field: field.to_string(),
                value: String::new(),
                reason: "field required".to_string(),
            });
            None
        }
        Some(value) => Some(value),
    }
}

fn string_field<'a>(
    issues: &mut Vec<FieldIssue>,
    object: &'a Map<String, Value>,
    field: &str,
) -> Option<&'a str> {
    let value = present(issues, object, field)?;
    if value.is_string() {
        return value.as_str();
    }
    issues.push(FieldIssue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "must be a string".to_string(),
    });
    None
}

fn integer_field(
    issues: &mut Vec<FieldIssue>,
    object: &Map<String, Value>,
    field: &str,
) -> Option<i64> {
    let value = present(issues, object, field)?;
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    issues.push(FieldIssue {
        field: field.to_string(),
        value: value.to_string(),
        reason: "must be an integer".to_string(),
    });
    None
}

/// 缺少的欄位為 None，已記錄在 issues 裡
struct RawFields<'a> {
    sex: Option<&'a str>,
    age: Option<&'a str>,
    hlth_pb: Option<&'a str>,
    isced97: Option<&'a str>,
    geo: Option<&'a str>,
    time: Option<i64>,
}

impl RawFields<'_> {
    fn validate(self, mut issues: Vec<FieldIssue>) -> Result<AccessRequest, ValidationError> {
        let sex = check_enum(&mut issues, "sex", self.sex, Sex::from_code, Sex::codes());
        let age = check_enum(
            &mut issues,
            "age",
            self.age,
            AgeBand::from_code,
            AgeBand::codes(),
        );
        let category = check_enum(
            &mut issues,
            "hlth_pb",
            self.hlth_pb,
            DisabilityCategory::from_code,
            DisabilityCategory::codes(),
        );
        let education = check_enum(
            &mut issues,
            "isced97",
            self.isced97,
            EducationLevel::from_code,
            EducationLevel::codes(),
        );

        let geo = self.geo.map(str::trim);
        if let (Some(raw), Some(geo)) = (self.geo, geo) {
            if !COUNTRY_CODE.is_match(geo) {
                issues.push(FieldIssue {
                    field: "geo".to_string(),
                    value: raw.to_string(),
                    reason: "must be a 2-3 letter upper-case country code".to_string(),
                });
            }
        }

        if let Some(time) = self.time {
            if !(MIN_YEAR..=MAX_YEAR).contains(&time) {
                issues.push(FieldIssue {
                    field: "time".to_string(),
                    value: time.to_string(),
                    reason: format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
                });
            }
        }

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        match (sex, age, category, education, geo, self.time) {
            (Some(sex), Some(age), Some(category), Some(education), Some(geo), Some(time)) => {
                Ok(AccessRequest {
                    sex,
                    age,
                    category,
                    education,
                    country: CountryCode::new_unchecked(geo),
                    // 範圍已檢查過
                    year: time as u16,
                })
            }
            _ => Err(ValidationError { issues }),
        }
    }
}
