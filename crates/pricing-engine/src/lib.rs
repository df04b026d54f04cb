pub mod floor;
pub mod positioning;
pub mod types;

pub use floor::compute_price_floor;
pub use positioning::{margin_analysis, recommend_price, ESTIMATED_MARKET_MULTIPLIER};
pub use types::*;
