//! Model health checks.

use log::error;

use crate::api::{Furnished, HealthResponse, HealthStatus, PropertyDetails, PropertyType};
use crate::service::RentalService;
use crate::util::now_iso;

/// Canonical probe listing used to exercise the full prediction path.
fn probe_property() -> PropertyDetails {
    PropertyDetails {
        property_type: PropertyType::Condominium,
        bedrooms: 3,
        bathrooms: 2,
        area: 1200.0,
        furnished: Furnished::Yes,
        location: "KLCC, Kuala Lumpur".to_string(),
    }
}

/// Expected band for the probe prediction on the Malaysian rental market.
const EXPECTED_PROBE_RANGE: std::ops::RangeInclusive<f64> = 500.0..=15_000.0;
const MAX_PLAUSIBLE_PROBE: f64 = 50_000.0;

impl RentalService {
    /// Run a test prediction and classify the outcome. Never fails: an
    /// unusable model is reported as unhealthy rather than as an error.
    pub fn health_check(&self) -> HealthResponse {
        let model = match self.model() {
            Ok(model) => model,
            Err(e) => {
                return HealthResponse {
                    status: HealthStatus::Unhealthy,
                    message: format!("health check failed: {e}"),
                    timestamp: now_iso(),
                    test_prediction: None,
                };
            }
        };

        match model.predict(&probe_property()) {
            Ok(prediction) => {
                let (status, message) = classify_probe(prediction);
                HealthResponse {
                    status,
                    message: message.to_string(),
                    timestamp: now_iso(),
                    test_prediction: Some(prediction),
                }
            }
            Err(e) => {
                error!("health check prediction failed: {e}");
                HealthResponse {
                    status: HealthStatus::Unhealthy,
                    message: format!("health check failed: {e}"),
                    timestamp: now_iso(),
                    test_prediction: None,
                }
            }
        }
    }
}

fn classify_probe(prediction: f64) -> (HealthStatus, &'static str) {
    if EXPECTED_PROBE_RANGE.contains(&prediction) {
        (HealthStatus::Healthy, "Model is working correctly")
    } else if prediction < *EXPECTED_PROBE_RANGE.start() {
        (
            HealthStatus::Warning,
            "Model prediction seems low but functional",
        )
    } else if prediction <= MAX_PLAUSIBLE_PROBE {
        (
            HealthStatus::Healthy,
            "Model prediction in high-end range but reasonable",
        )
    } else {
        (
            HealthStatus::Warning,
            "Model prediction seems very high but functional",
        )
    }
}
