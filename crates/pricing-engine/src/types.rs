use common::QualityPerception;
use serde::{Deserialize, Serialize};

/// Per-unit landed cost of a sourced product.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CostBasis {
    pub supplier_price: f64,
    pub shipping_cost: f64,
}

impl CostBasis {
    pub fn total(&self) -> f64 {
        self.supplier_price + self.shipping_cost
    }
}

/// Result of the price-floor calculation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriceFloor {
    pub total_cost: f64,
    /// 3.0 below the cost breakpoint, 2.0 above. A floor, never a ceiling.
    pub required_multiplier: f64,
    pub minimum_price: f64,
}

/// Observed or estimated bounds of competitor pricing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Market-side inputs for the positioning calculation.
#[derive(Debug, Clone)]
pub struct MarketContext {
    pub average_market_price: f64,
    pub market_price_range: Option<PriceRange>,
    pub quality: QualityPerception,
    /// 0-1; how distinctive the product is against the field.
    pub originality: f64,
    pub personalization: bool,
    pub competition_volume: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// Total supplier cost must be strictly positive; negative components
    /// are rejected outright.
    #[error("invalid supplier cost basis: total {0:.2} must be positive")]
    InvalidCost(f64),
}
