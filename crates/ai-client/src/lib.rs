//! Client for the external AI analysis service, plus normalization of
//! its untrusted payload into fields the pipeline can rely on.

pub mod client;
pub mod normalize;
pub mod types;

pub use client::AiClient;
pub use normalize::{normalize, normalize_seo_tags, synthesize_search_query, SEO_TAG_COUNT};
pub use types::{AiAnalysis, AiError, AiRequest, MarketPrice, RawAiResponse};
