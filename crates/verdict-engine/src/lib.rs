//! Launch/test/avoid verdict synthesis from all upstream estimates.

pub mod engine;
pub mod types;

pub use engine::synthesize_verdict;
pub use types::VerdictInputs;
