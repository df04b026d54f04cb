//! Launch-timing and three-month projection simulation.

pub mod engine;
pub mod types;

pub use engine::{expected_days_from_score, simulate_launch, AD_COST_RATE, AD_SALES_MULTIPLIER};
pub use types::ProjectionInputs;
