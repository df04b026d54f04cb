//! Price-floor calculation: the non-loss multiplier rule.
//!
//! Every downstream price must clear this floor. The multiplier rule
//! dominates the safety margin for any realistic cost, but both are
//! computed and the larger wins.

use crate::types::{CostBasis, PriceFloor, PricingError};

/// Total cost below which the 3x multiplier applies.
pub const MULTIPLIER_BREAKPOINT: f64 = 70.0;
/// Multiplier for low-cost products.
pub const LOW_COST_MULTIPLIER: f64 = 3.0;
/// Multiplier for higher-cost products.
pub const HIGH_COST_MULTIPLIER: f64 = 2.0;
/// Flat safety margin over raw cost.
pub const SAFETY_MARGIN_RATE: f64 = 1.20;

/// Compute the minimum non-loss resale price for a cost basis.
///
/// # Errors
///
/// [`PricingError::InvalidCost`] when either component is negative or the
/// total is not strictly positive.
pub fn compute_price_floor(cost: &CostBasis) -> Result<PriceFloor, PricingError> {
    let total = cost.total();
    if cost.supplier_price < 0.0 || cost.shipping_cost < 0.0 || total <= 0.0 || !total.is_finite()
    {
        return Err(PricingError::InvalidCost(total));
    }

    let required_multiplier = if total < MULTIPLIER_BREAKPOINT {
        LOW_COST_MULTIPLIER
    } else {
        HIGH_COST_MULTIPLIER
    };
    let minimum_by_multiplier = total * required_multiplier;
    let safety_margin = total * SAFETY_MARGIN_RATE;

    Ok(PriceFloor {
        total_cost: total,
        required_multiplier,
        minimum_price: minimum_by_multiplier.max(safety_margin),
    })
}
