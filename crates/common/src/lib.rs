//! Shared domain types, category classification, and error definitions
//! for the Etsmart analyzer pipeline.

pub mod category;
pub mod error;
pub mod types;

pub use category::{default_competitors, detect_category, ProductCategory};
pub use error::ProductError;
pub use types::*;
