//! Wire types for the RentVerse HTTP API.

use serde::{Deserialize, Serialize};

use crate::preprocess::de_flexible_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Condominium,
    #[serde(rename = "Service Residence")]
    ServiceResidence,
    Townhouse,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::Condominium => "Condominium",
            PropertyType::ServiceResidence => "Service Residence",
            PropertyType::Townhouse => "Townhouse",
        }
    }

    pub fn all() -> &'static [&'static str] {
        &["Apartment", "Condominium", "Service Residence", "Townhouse"]
    }
}

/// Furnished status values accepted by the model. Both the short form used
/// by listing imports ("Yes"/"No"/"Partial") and the long form shown in the
/// UI are supported, matching the training data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Furnished {
    Yes,
    No,
    Partial,
    #[serde(rename = "Fully Furnished")]
    FullyFurnished,
    #[serde(rename = "Partially Furnished")]
    PartiallyFurnished,
    Unfurnished,
}

impl Furnished {
    pub fn as_str(&self) -> &'static str {
        match self {
            Furnished::Yes => "Yes",
            Furnished::No => "No",
            Furnished::Partial => "Partial",
            Furnished::FullyFurnished => "Fully Furnished",
            Furnished::PartiallyFurnished => "Partially Furnished",
            Furnished::Unfurnished => "Unfurnished",
        }
    }

    pub fn all() -> &'static [&'static str] {
        &[
            "Yes",
            "No",
            "Partial",
            "Fully Furnished",
            "Partially Furnished",
            "Unfurnished",
        ]
    }
}

/// Property attributes shared by all prediction and classification requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Area in square feet. Accepts a bare number or a string such as
    /// "1,200 sqft" coming from listing imports.
    #[serde(deserialize_with = "de_flexible_number")]
    pub area: f64,
    pub furnished: Furnished,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionRequest {
    pub properties: Vec<PropertyDetails>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub confidence_score: f64,
    pub price_range: PriceRange,
    pub currency: String,
    pub status: String,
    pub model_version: String,
    pub features_used: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionItem {
    pub batch_index: usize,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchPredictionResponse {
    pub predictions: Vec<BatchPredictionItem>,
    pub total_count: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub test_r2: f64,
    pub cv_mean: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model_version: String,
    pub created_at: String,
    pub feature_columns: Vec<String>,
    pub supported_property_types: Vec<String>,
    pub supported_furnished_types: Vec<String>,
    pub is_loaded: bool,
    pub max_batch_size: usize,
    pub use_log_transform: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_metrics: Option<PerformanceMetrics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_prediction: Option<f64>,
}

/// Simplified response for the `/classify/price` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePredictionResponse {
    pub predicted_price: f64,
    pub price_range: PriceRange,
    pub currency: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingApprovalRequest {
    #[serde(flatten)]
    pub property: PropertyDetails,
    /// Asking price in RM. Accepts a bare number or a string such as
    /// "RM 4,500".
    #[serde(deserialize_with = "de_flexible_number")]
    pub asking_price: f64,
    #[serde(default)]
    pub property_age: Option<u32>,
    #[serde(default)]
    pub parking_spaces: Option<u32>,
    #[serde(default)]
    pub floor_level: Option<u32>,
    #[serde(default)]
    pub facilities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Approved,
    Rejected,
    NeedsReview,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingApprovalResponse {
    pub approval_status: ApprovalStatus,
    pub confidence_score: f64,
    pub predicted_price: f64,
    pub asking_price: f64,
    /// Deviation of the asking price from the predicted price, in percent.
    pub price_deviation: f64,
    pub approval_reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    pub status: String,
}
