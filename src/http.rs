//! HTTP layer: router, handlers, and the error mapping onto status codes.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::info;

use crate::api::{
    BatchPredictionRequest, BatchPredictionResponse, HealthResponse, ListingApprovalRequest,
    ListingApprovalResponse, ModelInfoResponse, PredictionResponse, PricePredictionResponse,
    PropertyDetails,
};
use crate::config::APP_NAME;
use crate::error::ServiceError;
use crate::service::RentalService;

pub fn router(service: RentalService) -> Router {
    let api = Router::new()
        .route("/health", get(get_health))
        .route("/health/model", get(get_model_health))
        .route("/predict/single", post(post_predict_single))
        .route("/predict/batch", post(post_predict_batch))
        .route("/predict/model-info", get(get_model_info))
        .route("/classify/price", post(post_classify_price))
        .route("/classify/approval", post(post_classify_approval));

    let prefix = service.config().api.prefix.clone();
    Router::new()
        .route("/", get(get_root))
        .nest(&prefix, api)
        .layer(middleware::from_fn(track_request))
        .with_state(service)
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message,
            "code": self.status.as_u16(),
            "status": "error",
        }));
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidParams(msg) => ApiError::new(StatusCode::BAD_REQUEST, msg),
            ServiceError::NotFound(msg) => ApiError::new(StatusCode::NOT_FOUND, msg),
            ServiceError::ModelNotLoaded => {
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "model not available")
            }
            ServiceError::ModelLoad(e) => {
                log::error!("model load error: {e}");
                ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "model not available")
            }
            ServiceError::Prediction(e) => {
                log::error!("prediction error: {e}");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "prediction failed")
            }
            ServiceError::Other(e) => {
                log::error!("internal error: {e:#}");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

/// Log every request and report the handling time in `X-Process-Time`.
async fn track_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64();
    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.6}")) {
        response.headers_mut().insert("x-process-time", value);
    }
    info!("{method} {path} -> {} in {elapsed:.3}s", response.status());

    response
}

async fn get_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": format!("Welcome to the {APP_NAME}") }))
}

async fn get_health(State(service): State<RentalService>) -> Json<HealthResponse> {
    Json(service.health_check())
}

async fn get_model_health(
    State(service): State<RentalService>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    Ok(Json(service.model_info()?))
}

async fn get_model_info(
    State(service): State<RentalService>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    Ok(Json(service.model_info()?))
}

async fn post_predict_single(
    State(service): State<RentalService>,
    Json(details): Json<PropertyDetails>,
) -> Result<Json<PredictionResponse>, ApiError> {
    Ok(Json(service.predict_single(&details)?))
}

async fn post_predict_batch(
    State(service): State<RentalService>,
    Json(request): Json<BatchPredictionRequest>,
) -> Result<Json<BatchPredictionResponse>, ApiError> {
    Ok(Json(service.predict_batch(&request)?))
}

async fn post_classify_price(
    State(service): State<RentalService>,
    Json(details): Json<PropertyDetails>,
) -> Result<Json<PricePredictionResponse>, ApiError> {
    Ok(Json(service.classify_price(&details)?))
}

async fn post_classify_approval(
    State(service): State<RentalService>,
    Json(request): Json<ListingApprovalRequest>,
) -> Result<Json<ListingApprovalResponse>, ApiError> {
    Ok(Json(service.classify_approval(&request)?))
}
