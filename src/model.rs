//! Pricing model loading and inference.
//!
//! The model is shipped as a JSON artifact exported from the training
//! pipeline: a linear model over label-encoded and scaled features, with an
//! optional log transform on the target. Enhanced artifacts are preferred
//! over the standard export when both are present.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::{PerformanceMetrics, PropertyDetails};
use crate::error::ServiceError;
use crate::preprocess::{parse_location, validate_details};

/// Artifact filenames probed in the model directory, in order of preference.
const ARTIFACT_CANDIDATES: &[&str] = &["enhanced_pricing_model.json", "standard_pricing_model.json"];

/// Predictions outside this band are logged as suspicious but still returned.
const PLAUSIBLE_RENT_RANGE: std::ops::RangeInclusive<f64> = 500.0..=50_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingArtifact {
    pub model_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub feature_names: Vec<String>,
    /// Label-encoder classes per categorical feature, in encoding order.
    pub encoders: BTreeMap<String, Vec<String>>,
    pub scaler: ScalerParams,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub use_log_transform: bool,
    #[serde(default)]
    pub performance_metrics: Option<PerformanceMetrics>,
}

pub struct PriceModel {
    artifact: PricingArtifact,
}

impl PriceModel {
    /// Load the first available artifact from `model_dir`.
    pub fn load(model_dir: &str) -> Result<Self, ServiceError> {
        let dir = Path::new(model_dir);
        let path = ARTIFACT_CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
            .ok_or_else(|| {
                ServiceError::ModelLoad(format!("no model artifact found in {model_dir}"))
            })?;

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| ServiceError::ModelLoad(format!("{}: {e}", path.display())))?;
        let artifact: PricingArtifact = serde_json::from_str(&raw)
            .map_err(|e| ServiceError::ModelLoad(format!("{}: {e}", path.display())))?;

        info!("loaded pricing artifact from {}", path.display());
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: PricingArtifact) -> Result<Self, ServiceError> {
        let n = artifact.feature_names.len();
        if n == 0 {
            return Err(ServiceError::ModelLoad(
                "artifact has no features".to_string(),
            ));
        }
        if artifact.coefficients.len() != n {
            return Err(ServiceError::ModelLoad(format!(
                "artifact has {n} features but {} coefficients",
                artifact.coefficients.len()
            )));
        }
        if artifact.scaler.mean.len() != n || artifact.scaler.std.len() != n {
            return Err(ServiceError::ModelLoad(format!(
                "scaler parameters do not match {n} features"
            )));
        }

        info!(
            "pricing model ready: name={}, features={:?}, log_transform={}",
            artifact.model_name, artifact.feature_names, artifact.use_log_transform
        );
        Ok(Self { artifact })
    }

    pub fn version(&self) -> &str {
        &self.artifact.model_name
    }

    pub fn created_at(&self) -> &str {
        self.artifact.created_at.as_deref().unwrap_or("unknown")
    }

    pub fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }

    pub fn use_log_transform(&self) -> bool {
        self.artifact.use_log_transform
    }

    pub fn performance_metrics(&self) -> Option<&PerformanceMetrics> {
        self.artifact.performance_metrics.as_ref()
    }

    /// Predict the monthly rent in RM for the given property.
    pub fn predict(&self, details: &PropertyDetails) -> Result<f64, ServiceError> {
        validate_details(details)?;

        let mut prediction = self.artifact.intercept;
        for (i, name) in self.artifact.feature_names.iter().enumerate() {
            let raw = self.feature_value(name, details)?;
            let std = self.artifact.scaler.std[i];
            let scaled = if std > 0.0 {
                (raw - self.artifact.scaler.mean[i]) / std
            } else {
                0.0
            };
            prediction += self.artifact.coefficients[i] * scaled;
        }

        if self.artifact.use_log_transform {
            prediction = prediction.exp_m1();
        }

        if !prediction.is_finite() {
            return Err(ServiceError::Prediction(
                "model produced a non-finite price".to_string(),
            ));
        }
        if !PLAUSIBLE_RENT_RANGE.contains(&prediction) {
            warn!("prediction outside plausible range: RM {prediction:.0}");
        }

        Ok(prediction)
    }

    fn feature_value(&self, name: &str, details: &PropertyDetails) -> Result<f64, ServiceError> {
        let value = match name {
            "property_type" => self.encode(name, details.property_type.as_str()),
            "bedrooms" => f64::from(details.bedrooms),
            "bathrooms" => f64::from(details.bathrooms),
            "area" => details.area,
            "furnished" => self.encode(name, details.furnished.as_str()),
            "region" => self.encode(name, &parse_location(&details.location)),
            other => {
                return Err(ServiceError::Prediction(format!(
                    "artifact references unsupported feature {other:?}"
                )));
            }
        };
        Ok(value)
    }

    /// Label-encode a categorical value. Unseen values fall back to the
    /// artifact's "unknown" class when it exists, otherwise to class 0.
    fn encode(&self, feature: &str, value: &str) -> f64 {
        let Some(classes) = self.artifact.encoders.get(feature) else {
            return 0.0;
        };
        let index = classes
            .iter()
            .position(|c| c == value)
            .or_else(|| classes.iter().position(|c| c == "unknown"))
            .unwrap_or(0);
        index as f64
    }

    /// Deterministic confidence score derived from the training metrics.
    pub fn confidence_score(&self) -> f64 {
        match self.performance_metrics() {
            Some(metrics) => {
                let adjustment = if metrics.test_r2 >= 0.8 {
                    0.05
                } else if metrics.test_r2 >= 0.6 {
                    0.02
                } else {
                    -0.05
                };
                (metrics.cv_mean + adjustment).clamp(0.60, 0.95)
            }
            None => 0.80,
        }
    }

    /// Half-width of the reported price range relative to the prediction.
    /// Weaker models report a wider range (10-25%).
    pub fn range_factor(&self) -> f64 {
        match self.performance_metrics() {
            Some(metrics) => {
                let uncertainty = (1.0 - metrics.test_r2).max(0.0);
                (0.10 + uncertainty * 0.15).clamp(0.10, 0.25)
            }
            None => 0.15,
        }
    }
}
