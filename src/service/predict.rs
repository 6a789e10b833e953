//! Single and batch rent price prediction.

use log::info;

use crate::api::{
    BatchPredictionItem, BatchPredictionRequest, BatchPredictionResponse, Furnished,
    ModelInfoResponse, PredictionResponse, PriceRange, PropertyDetails, PropertyType,
};
use crate::error::ServiceError;
use crate::service::RentalService;
use crate::util::{format_rm, now_iso};

impl RentalService {
    /// Predict the rent for a single property, with confidence metrics.
    pub fn predict_single(
        &self,
        details: &PropertyDetails,
    ) -> Result<PredictionResponse, ServiceError> {
        let model = self.model()?;
        let predicted_price = model.predict(details)?;

        let range_factor = model.range_factor();
        info!(
            "prediction completed for {} in {}: {}",
            details.property_type.as_str(),
            details.location,
            format_rm(predicted_price)
        );

        Ok(PredictionResponse {
            predicted_price,
            confidence_score: model.confidence_score(),
            price_range: PriceRange {
                min: predicted_price * (1.0 - range_factor),
                max: predicted_price * (1.0 + range_factor),
            },
            currency: "RM".to_string(),
            status: "success".to_string(),
            model_version: model.version().to_string(),
            features_used: model.feature_names().to_vec(),
            timestamp: now_iso(),
        })
    }

    /// Predict rents for a batch of properties. Individual failures become
    /// error entries; the batch itself only fails when the model is missing
    /// or the batch exceeds the configured size limit.
    pub fn predict_batch(
        &self,
        request: &BatchPredictionRequest,
    ) -> Result<BatchPredictionResponse, ServiceError> {
        let max = self.config().api.max_batch_size;
        if request.properties.is_empty() {
            return Err(ServiceError::InvalidParams(
                "batch must contain at least one property".to_string(),
            ));
        }
        if request.properties.len() > max {
            return Err(ServiceError::InvalidParams(format!(
                "batch size {} exceeds maximum {max}",
                request.properties.len()
            )));
        }
        // Fail the whole batch up front when no model is available.
        self.model()?;

        let predictions: Vec<BatchPredictionItem> = request
            .properties
            .iter()
            .enumerate()
            .map(|(batch_index, details)| match self.predict_single(details) {
                Ok(result) => BatchPredictionItem {
                    batch_index,
                    status: "success".to_string(),
                    predicted_price: Some(result.predicted_price),
                    confidence_score: Some(result.confidence_score),
                    price_range: Some(result.price_range),
                    currency: Some(result.currency),
                    model_version: Some(result.model_version),
                    error: None,
                    timestamp: result.timestamp,
                },
                Err(e) => BatchPredictionItem {
                    batch_index,
                    status: "error".to_string(),
                    predicted_price: None,
                    confidence_score: None,
                    price_range: None,
                    currency: None,
                    model_version: None,
                    error: Some(e.to_string()),
                    timestamp: now_iso(),
                },
            })
            .collect();

        let success_count = predictions.iter().filter(|p| p.status == "success").count();
        let error_count = predictions.len() - success_count;
        info!(
            "batch prediction completed: total={}, successful={success_count}, failed={error_count}",
            predictions.len()
        );

        Ok(BatchPredictionResponse {
            total_count: predictions.len(),
            success_count,
            error_count,
            predictions,
            timestamp: now_iso(),
        })
    }

    /// Metadata about the loaded model and the service limits.
    pub fn model_info(&self) -> Result<ModelInfoResponse, ServiceError> {
        let model = self.model()?;
        Ok(ModelInfoResponse {
            model_version: model.version().to_string(),
            created_at: model.created_at().to_string(),
            feature_columns: model.feature_names().to_vec(),
            supported_property_types: PropertyType::all().iter().map(|s| s.to_string()).collect(),
            supported_furnished_types: Furnished::all().iter().map(|s| s.to_string()).collect(),
            is_loaded: true,
            max_batch_size: self.config().api.max_batch_size,
            use_log_transform: model.use_log_transform(),
            performance_metrics: model.performance_metrics().cloned(),
        })
    }
}
