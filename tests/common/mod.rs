//! Helpers for driving a live service instance over HTTP.

use std::collections::BTreeMap;

use rentverse::api::PerformanceMetrics;
use rentverse::config::{ApiConfig, AppConfig, ModelConfig, ServerConfig};
use rentverse::model::{PriceModel, PricingArtifact, ScalerParams};
use rentverse::service::RentalService;
use tower_http::cors::{Any, CorsLayer};

pub fn config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: log::Level::Info,
            debug: false,
        },
        model: ModelConfig {
            model_dir: "models".to_string(),
        },
        api: ApiConfig {
            prefix: "/api/v1".to_string(),
            max_batch_size: 100,
        },
    }
}

/// Linear artifact with identity scaling: price = 100 + 2 * area. The
/// canonical 1200 sqft condominium predicts RM 2500.
pub fn artifact() -> PricingArtifact {
    PricingArtifact {
        model_name: "linear-test".to_string(),
        created_at: Some("2025-09-13".to_string()),
        feature_names: vec![
            "property_type".to_string(),
            "bedrooms".to_string(),
            "bathrooms".to_string(),
            "area".to_string(),
            "furnished".to_string(),
            "region".to_string(),
        ],
        encoders: BTreeMap::from([
            (
                "property_type".to_string(),
                vec![
                    "Apartment".to_string(),
                    "Condominium".to_string(),
                    "Service Residence".to_string(),
                    "Townhouse".to_string(),
                ],
            ),
            (
                "furnished".to_string(),
                vec![
                    "No".to_string(),
                    "Partial".to_string(),
                    "Yes".to_string(),
                    "unknown".to_string(),
                ],
            ),
            (
                "region".to_string(),
                vec![
                    "kuala lumpur".to_string(),
                    "penang".to_string(),
                    "selangor".to_string(),
                    "unknown".to_string(),
                ],
            ),
        ]),
        scaler: ScalerParams {
            mean: vec![0.0; 6],
            std: vec![1.0; 6],
        },
        coefficients: vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0],
        intercept: 100.0,
        use_log_transform: false,
        performance_metrics: Some(PerformanceMetrics {
            test_r2: 0.85,
            cv_mean: 0.82,
        }),
    }
}

pub fn service_with_model() -> RentalService {
    let model = PriceModel::from_artifact(artifact()).expect("test artifact is valid");
    RentalService::with_model(config(), model)
}

/// Serve the app on an ephemeral port and return its base URL.
pub async fn spawn_app(service: RentalService) -> String {
    let cors_layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);
    let app = rentverse::http::router(service).layer(cors_layer);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server task");
    });

    format!("http://{addr}")
}

pub fn condo_payload() -> serde_json::Value {
    serde_json::json!({
        "property_type": "Condominium",
        "bedrooms": 3,
        "bathrooms": 2,
        "area": 1200,
        "furnished": "Yes",
        "location": "KLCC, Kuala Lumpur"
    })
}
