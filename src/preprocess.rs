//! Inference-side preprocessing for property data.
//!
//! Mirrors the transform step of the training pipeline: numeric cleaning of
//! price/area strings, region extraction from free-form locations, and
//! range validation of the inputs before they reach the model.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, de};

use crate::api::PropertyDetails;
use crate::error::ServiceError;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("valid regex"));

/// Longest location string the model accepts.
const MAX_LOCATION_LEN: usize = 200;

fn clean_numeric(raw: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(raw, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Extract a numeric price from strings like "RM 1,200" or "1200.50".
pub fn clean_price(raw: &str) -> Option<f64> {
    clean_numeric(raw)
}

/// Extract a numeric area from strings like "1,200 sqft".
pub fn clean_area(raw: &str) -> Option<f64> {
    clean_numeric(raw)
}

/// Extract the region from a location string. The last comma-separated
/// segment is taken as the most general part ("KLCC, Kuala Lumpur" ->
/// "kuala lumpur"); missing or unparseable locations map to "unknown".
pub fn parse_location(location: &str) -> String {
    let region = location
        .rsplit(", ")
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let region: String = region
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    let region = region.trim().to_string();
    if region.is_empty() {
        "unknown".to_string()
    } else {
        region
    }
}

/// Validate property details against the ranges the model was trained on.
pub fn validate_details(details: &PropertyDetails) -> Result<(), ServiceError> {
    if details.bedrooms > 10 {
        return Err(ServiceError::InvalidParams(format!(
            "bedrooms must be between 0 and 10, got {}",
            details.bedrooms
        )));
    }
    if details.bathrooms < 1 || details.bathrooms > 10 {
        return Err(ServiceError::InvalidParams(format!(
            "bathrooms must be between 1 and 10, got {}",
            details.bathrooms
        )));
    }
    if !details.area.is_finite() || details.area <= 0.0 || details.area > 10_000.0 {
        return Err(ServiceError::InvalidParams(format!(
            "area must be between 0 and 10000 sqft, got {}",
            details.area
        )));
    }
    if details.location.trim().is_empty() {
        return Err(ServiceError::InvalidParams(
            "location must not be empty".to_string(),
        ));
    }
    if details.location.chars().count() > MAX_LOCATION_LEN {
        return Err(ServiceError::InvalidParams(format!(
            "location must be at most {MAX_LOCATION_LEN} characters"
        )));
    }
    Ok(())
}

/// Deserialize a number that may arrive as a JSON number or as a formatted
/// string ("RM 4,500", "1,200 sqft").
pub fn de_flexible_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Num(f64),
        Str(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Num(n) => Ok(n),
        NumberOrString::Str(s) => clean_numeric(&s)
            .ok_or_else(|| de::Error::custom(format!("could not parse number from {s:?}"))),
    }
}
