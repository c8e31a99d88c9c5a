use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use edu_access::core::encoder::{EncoderTables, FeatureEncoder};
use edu_access::domain::ports::{EncodedFeatures, Regressor};
use edu_access::utils::error::InferenceError;
use edu_access::{create_router, AppState, PredictionService};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Always returns the same raw prediction, counting calls.
struct StubRegressor {
    value: f64,
    calls: AtomicUsize,
}

impl Regressor for StubRegressor {
    fn predict(&self, _features: &EncodedFeatures) -> Result<f64, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.value)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn create_test_app(raw_prediction: f64) -> (Router, Arc<StubRegressor>) {
    let encoder = FeatureEncoder::from_tables(&EncoderTables {
        sex: strings(&["F", "M"]),
        age: strings(&["Y15-24", "Y25-34", "Y35-44", "Y45-54", "Y55-64"]),
        hlth_pb: strings(&["PB1040", "PB1041", "PB1070", "PB1071"]),
        isced97: strings(&["ED0-2", "ED3_4", "ED5_6", "NRP"]),
        geo: strings(&["AT ", "BE ", "DE ", "FR "]),
    })
    .expect("test");

    let regressor = Arc::new(StubRegressor {
        value: raw_prediction,
        calls: AtomicUsize::new(0),
    });
    let service = PredictionService::new(encoder, regressor.clone());
    (create_router(AppState::new(service)), regressor)
}

fn sample_body(geo: &str) -> Value {
    json!({
        "sex": "F",
        "age": "Y15-24",
        "hlth_pb": "PB1040",
        "isced97": "ED3_4",
        "geo": geo,
        "time": 2022
    })
}

async fn post_predict(app: Router, body: String) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .expect("test"),
        )
        .await
        .expect("test");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("test");
    (status, serde_json::from_slice(&bytes).expect("test"))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("test"))
        .await
        .expect("test");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("test");
    (status, serde_json::from_slice(&bytes).expect("test"))
}

#[tokio::test]
async fn test_predict_target_country_applies_factor() {
    let (app, _) = create_test_app(1000.0);
    let (status, body) = post_predict(app, sample_body("NG").to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_access"], json!(300.0));
    assert_eq!(body["european_baseline"], json!(1000.0));
    assert_eq!(body["african_adjustment_factor"], json!(0.3));
    assert_eq!(body["access_level"], "Moderate");
    assert_eq!(body["access_description"], "Moderate access to education");
    assert_eq!(body["unit"], "thousands");
    assert!(body["african_recommendation"]
        .as_str()
        .unwrap()
        .starts_with("Focus on vocational training"));
    assert!(body["policy_suggestion"]
        .as_str()
        .unwrap()
        .contains("Allocate resources for advanced educational programs"));
}

#[tokio::test]
async fn test_predict_reference_country_is_unadjusted() {
    let (app, _) = create_test_app(1000.0);
    let (status, body) = post_predict(app, sample_body("BE").to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_access"], json!(1000.0));
    assert!(body["european_baseline"].is_null());
    assert!(body["african_adjustment_factor"].is_null());
    assert_eq!(body["access_level"], "Very High");
    assert_eq!(
        body["african_recommendation"],
        "This is a European reference case. Use these patterns to inform African educational development."
    );
    assert_eq!(
        body["policy_suggestion"],
        "Use European educational policies as reference for development."
    );
}

#[tokio::test]
async fn test_predict_invalid_age_is_rejected_before_model() {
    let (app, regressor) = create_test_app(1000.0);
    let mut request = sample_body("NG");
    request["age"] = json!("Y99-100");

    let (status, body) = post_predict(app, request.to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "age");
    assert_eq!(body["errors"][0]["value"], "Y99-100");
    assert_eq!(regressor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_predict_year_out_of_range() {
    let (app, _) = create_test_app(1000.0);
    let mut request = sample_body("BE");
    request["time"] = json!(2031);

    let (status, body) = post_predict(app, request.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "time");
}

#[tokio::test]
async fn test_predict_missing_field_is_validation_error() {
    let (app, regressor) = create_test_app(1000.0);
    let mut request = sample_body("BE");
    request["sex"] = json!("X");
    request.as_object_mut().expect("test").remove("time");

    let (status, body) = post_predict(app, request.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("test")
        .iter()
        .map(|issue| issue["field"].as_str().expect("test"))
        .collect();
    assert_eq!(fields, vec!["time", "sex"]);
    assert_eq!(body["errors"][0]["reason"], "field required");
    assert_eq!(regressor.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_predict_mistyped_field_is_named() {
    let (app, _) = create_test_app(1000.0);
    let mut request = sample_body("BE");
    request["time"] = json!("2022");

    let (status, body) = post_predict(app, request.to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "time");
    assert_eq!(body["errors"][0]["reason"], "must be an integer");
}

#[tokio::test]
async fn test_predict_malformed_json_is_body_error() {
    let (app, _) = create_test_app(1000.0);
    let (status, body) = post_predict(app, "{ not json".to_string()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn test_predict_unknown_country_is_server_error() {
    let (app, _) = create_test_app(1000.0);
    let (status, body) = post_predict(app, sample_body("US").to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["detail"],
        "Prediction error: unknown value 'US' for field 'geo'"
    );
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_predict_is_idempotent() {
    let (app, _) = create_test_app(150.0);
    let (_, first) = post_predict(app.clone(), sample_body("ZA").to_string()).await;
    let (_, second) = post_predict(app, sample_body("ZA").to_string()).await;

    assert_eq!(first, second);
    assert_eq!(first["access_level"], "Very Low");
}

#[tokio::test]
async fn test_access_level_matches_thresholds() {
    for (raw, expected) in [
        (50.0, "Very Low"),
        (100.0, "Low"),
        (200.0, "Moderate"),
        (500.0, "High"),
        (1000.0, "Very High"),
    ] {
        let (app, _) = create_test_app(raw);
        let (status, body) = post_predict(app, sample_body("DE").to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["access_level"], expected, "raw prediction {}", raw);
    }
}

#[tokio::test]
async fn test_countries_lists_are_fixed() {
    let (app, _) = create_test_app(0.0);
    let (status, body) = get_json(app, "/countries").await;

    assert_eq!(status, StatusCode::OK);
    let reference = body["european_reference_countries"].as_array().unwrap();
    let target = body["african_target_countries"].as_array().unwrap();
    assert_eq!(reference.len(), 31);
    assert_eq!(target.len(), 20);
    assert_eq!(reference[0], "AT");
    assert_eq!(reference[30], "UK");
    assert_eq!(target[0], "NG");
    assert_eq!(target[19], "SN");
}

#[tokio::test]
async fn test_root_metadata() {
    let (app, _) = create_test_app(0.0);
    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "African Education Access Prediction API");
    assert_eq!(body["endpoints"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_cors_is_open() {
    let (app, _) = create_test_app(0.0);
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/predict")
                .header("origin", "https://example.org")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .expect("test"),
        )
        .await
        .expect("test");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("test"),
        "*"
    );
}
