//! Simplified price prediction and listing approval classification.

use log::info;

use crate::api::{
    ApprovalStatus, ListingApprovalRequest, ListingApprovalResponse, PricePredictionResponse,
    PriceRange, PropertyDetails,
};
use crate::error::ServiceError;
use crate::service::RentalService;
use crate::util::format_rm;

/// Locations that count as premium areas when scoring a listing.
const PREMIUM_AREAS: &[&str] = &[
    "klcc",
    "mont kiara",
    "bangsar",
    "damansara",
    "shah alam",
    "petaling jaya",
];

/// Asking prices within this deviation of the prediction are acceptable.
const ACCEPTABLE_DEVIATION_PCT: f64 = 15.0;
/// Above this deviation a listing is rejected outright.
const REJECT_DEVIATION_PCT: f64 = 30.0;

impl RentalService {
    /// Predict a price with the simplified response shape used by the
    /// listing frontend: price plus a flat +/-10% range.
    pub fn classify_price(
        &self,
        details: &PropertyDetails,
    ) -> Result<PricePredictionResponse, ServiceError> {
        let predicted = self.model()?.predict(details)?;
        info!("price classification completed: {}", format_rm(predicted));

        Ok(PricePredictionResponse {
            predicted_price: round2(predicted),
            price_range: PriceRange {
                min: round2(predicted * 0.9),
                max: round2(predicted * 1.1),
            },
            currency: "RM".to_string(),
            status: "success".to_string(),
        })
    }

    /// Decide whether a listing should be approved, rejected, or routed to
    /// manual review, based on how far the asking price deviates from the
    /// predicted market price and on basic quality factors.
    pub fn classify_approval(
        &self,
        request: &ListingApprovalRequest,
    ) -> Result<ListingApprovalResponse, ServiceError> {
        if request.asking_price <= 0.0 {
            return Err(ServiceError::InvalidParams(
                "asking_price must be positive".to_string(),
            ));
        }

        let predicted = self.model()?.predict(&request.property)?;
        let deviation = (request.asking_price - predicted) / predicted * 100.0;
        let decision = decide(request, deviation);

        info!(
            "listing approval for {} at {}: {:?} (confidence {:.2})",
            request.property.property_type.as_str(),
            format_rm(request.asking_price),
            decision.status,
            decision.confidence,
        );

        Ok(ListingApprovalResponse {
            approval_status: decision.status,
            confidence_score: round2(decision.confidence),
            predicted_price: round2(predicted),
            asking_price: request.asking_price,
            price_deviation: round1(deviation),
            approval_reasons: decision.reasons,
            recommendations: if decision.recommendations.is_empty() {
                None
            } else {
                Some(decision.recommendations)
            },
            status: "success".to_string(),
        })
    }
}

struct Decision {
    status: ApprovalStatus,
    confidence: f64,
    reasons: Vec<String>,
    recommendations: Vec<String>,
}

#[derive(PartialEq)]
enum PriceStatus {
    Acceptable,
    Overpriced,
    Underpriced,
}

fn decide(request: &ListingApprovalRequest, deviation: f64) -> Decision {
    let mut reasons = Vec::new();
    let mut recommendations = Vec::new();

    let price_status = if deviation.abs() <= ACCEPTABLE_DEVIATION_PCT {
        reasons.push("Price within acceptable range".to_string());
        PriceStatus::Acceptable
    } else if deviation > ACCEPTABLE_DEVIATION_PCT {
        recommendations.push(format!(
            "Consider reducing price by {:.1}% for better market fit",
            deviation - ACCEPTABLE_DEVIATION_PCT
        ));
        PriceStatus::Overpriced
    } else {
        reasons.push("Competitively priced".to_string());
        recommendations.push(
            "Price is very competitive, consider slight increase if demand is high".to_string(),
        );
        PriceStatus::Underpriced
    };

    let property = &request.property;
    if property.bedrooms >= 1 && property.bathrooms >= 1 && property.area >= 300.0 {
        reasons.push("Adequate property specifications".to_string());
    } else {
        recommendations.push("Verify property specifications meet minimum standards".to_string());
    }

    let location = property.location.to_lowercase();
    if PREMIUM_AREAS.iter().any(|area| location.contains(area)) {
        reasons.push("Good location".to_string());
    }

    match request.facilities.as_deref() {
        Some(facilities) if facilities.len() >= 2 => {
            reasons.push("Adequate facilities".to_string());
        }
        Some(facilities) if !facilities.is_empty() => {}
        _ => {
            recommendations.push("Consider highlighting available facilities".to_string());
        }
    }

    if price_status == PriceStatus::Acceptable && reasons.len() >= 2 {
        Decision {
            status: ApprovalStatus::Approved,
            confidence: (0.6 + reasons.len() as f64 * 0.1).min(0.9),
            reasons,
            recommendations,
        }
    } else if price_status == PriceStatus::Overpriced && deviation > REJECT_DEVIATION_PCT {
        recommendations.push("Adjust pricing to market standards".to_string());
        Decision {
            status: ApprovalStatus::Rejected,
            confidence: (0.5 + deviation.abs() / 100.0).min(0.85),
            reasons: vec!["Price significantly above market rate".to_string()],
            recommendations,
        }
    } else {
        if reasons.is_empty() {
            reasons.push("Requires manual review".to_string());
        }
        recommendations.push("Manual review recommended for final approval".to_string());
        Decision {
            status: ApprovalStatus::NeedsReview,
            confidence: 0.7,
            reasons,
            recommendations,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
