//! HTTP API for education access prediction
//!
//! ## Endpoints
//!
//! - `GET /` - Service metadata
//! - `GET /countries` - Reference and target country codes
//! - `POST /predict` - Predict education access for one request
//!
//! ## Example
//!
//! ```rust,ignore
//! use edu_access::api::{create_router, AppState};
//!
//! let state = AppState::new(service);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    core::service::PredictionService,
    domain::{
        model::AccessPrediction,
        region::{REFERENCE_COUNTRIES, TARGET_COUNTRIES},
    },
    utils::error::{ErrorCategory, FieldIssue, ServiceError, ValidationError},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    service: PredictionService,
}

impl AppState {
    #[must_use]
    pub fn new(service: PredictionService) -> Self {
        Self { service }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub description: String,
    pub endpoints: Vec<String>,
    pub mission: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    pub european_reference_countries: Vec<String>,
    pub african_target_countries: Vec<String>,
    pub note: String,
}

/// Error body. `errors` lists offending fields for validation failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldIssue>,
}

pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.category() {
            ErrorCategory::Client => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::Inference | ErrorCategory::Startup => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let errors = match &self.0 {
            ServiceError::Validation(v) => v.issues.clone(),
            _ => Vec::new(),
        };

        if status.is_server_error() {
            tracing::error!("❌ {}", self.0);
        } else {
            tracing::warn!("Rejected request: {}", self.0);
        }

        (
            status,
            Json(ErrorResponse {
                detail: self.0.to_string(),
                errors,
            }),
        )
            .into_response()
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    // 公開展示用，CORS 全開
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/countries", get(countries_handler))
        .route("/predict", post(predict_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "African Education Access Prediction API".to_string(),
        description: "Using European educational infrastructure data to improve African education access".to_string(),
        endpoints: vec![
            "GET /".to_string(),
            "GET /countries".to_string(),
            "POST /predict".to_string(),
        ],
        mission: "Improve educational accessibility for disabled people in Africa using European patterns as reference".to_string(),
    })
}

/// Codes are returned trimmed. The fitted `geo` vocabulary pads them (`"AT "`),
/// and requests are matched after trimming either way.
async fn countries_handler() -> Json<CountriesResponse> {
    Json(CountriesResponse {
        european_reference_countries: REFERENCE_COUNTRIES
            .iter()
            .map(|c| c.to_string())
            .collect(),
        african_target_countries: TARGET_COUNTRIES.iter().map(|c| c.to_string()).collect(),
        note: "European countries provide reference data, African countries receive predictions and recommendations".to_string(),
    })
}

async fn predict_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AccessPrediction>, ApiError> {
    // 欄位層級的錯誤交給 validator，這裡只處理不是 JSON 的 body
    let Json(body) = payload.map_err(|rejection| {
        ServiceError::Validation(ValidationError::single("body", "", rejection.body_text()))
    })?;

    let prediction = state.service.predict_json(&body)?;
    Ok(Json(prediction))
}
