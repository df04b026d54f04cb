//! Competition and saturation estimation from competitor listing counts.

pub mod competition;
pub mod saturation;

pub use competition::{classify_structure, competition_score, estimate_competitors};
pub use saturation::saturation_outlook;
