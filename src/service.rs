//! Core service wiring: configuration plus the loaded pricing model.

use std::sync::Arc;

use log::warn;

use crate::config::AppConfig;
use crate::error::ServiceError;
use crate::model::PriceModel;

pub mod classify;
pub mod health;
pub mod predict;

struct ServiceInner {
    config: AppConfig,
    model: Option<PriceModel>,
}

/// Shared application state handed to the HTTP layer. Cheap to clone.
#[derive(Clone)]
pub struct RentalService {
    inner: Arc<ServiceInner>,
}

impl RentalService {
    /// Build the service, attempting to load the pricing model from the
    /// configured directory. The service starts even when no artifact is
    /// available; model-backed endpoints then report 503 until one is
    /// deployed, matching the health-check contract.
    pub fn new(config: AppConfig) -> Self {
        let model = match PriceModel::load(&config.model.model_dir) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!("starting without a pricing model: {e}");
                None
            }
        };
        Self::assemble(config, model)
    }

    /// Build the service around an already-constructed model.
    pub fn with_model(config: AppConfig, model: PriceModel) -> Self {
        Self::assemble(config, Some(model))
    }

    /// Build the service with no model at all.
    pub fn without_model(config: AppConfig) -> Self {
        Self::assemble(config, None)
    }

    fn assemble(config: AppConfig, model: Option<PriceModel>) -> Self {
        Self {
            inner: Arc::new(ServiceInner { config, model }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub(crate) fn model(&self) -> Result<&PriceModel, ServiceError> {
        self.inner.model.as_ref().ok_or(ServiceError::ModelNotLoaded)
    }

    pub fn is_model_loaded(&self) -> bool {
        self.inner.model.is_some()
    }
}
