//! Request-level errors, the only failures that surface to callers.
//!
//! Everything else in the pipeline (AI unavailability, invalid cost bases)
//! is absorbed by the fallback layers and never propagates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// The request carries no usable reference image, so neither the AI
    /// path nor a meaningful fallback can identify the product.
    #[error("product has no reference image")]
    MissingImage,
}
