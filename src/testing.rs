//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::api::PerformanceMetrics;
use crate::config::{ApiConfig, AppConfig, ModelConfig, ServerConfig};
use crate::model::{PriceModel, PricingArtifact, ScalerParams};
use crate::service::RentalService;

pub fn test_config() -> AppConfig {
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

/// A linear artifact with identity scaling: price = 100 + 2 * area, so the
/// canonical 1200 sqft probe property predicts RM 2500.
pub fn test_artifact() -> PricingArtifact {
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

pub fn test_service() -> RentalService {
    let model = PriceModel::from_artifact(test_artifact()).expect("test artifact is valid");
    RentalService::with_model(test_config(), model)
}
