use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{QualityPerception, SaturationPhase};

/// Outbound request to the analysis service.
#[derive(Debug, Clone, Serialize)]
pub struct AiRequest {
    pub request_id: Uuid,
    pub price: f64,
    pub niche: String,
    pub image_url: String,
}

/// Raw service payload. Every field is optional; nothing from the
/// collaborator is trusted until [`crate::normalize`] has seen it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawAiResponse {
    pub status: Option<String>,
    pub estimated_competitors: Option<u32>,
    pub saturation_level: Option<String>,
    pub recommended_price: Option<RawPriceBand>,
    pub launch_estimate: Option<RawLaunchEstimate>,
    pub niche_match: Option<bool>,
    pub product_visual_description: Option<String>,
    pub etsy_search_query: Option<String>,
    pub seo_tags: Option<Vec<String>>,
    pub quality_perception: Option<String>,
    pub originality: Option<f64>,
    pub personalization: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawPriceBand {
    pub optimal: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawLaunchEstimate {
    /// 0-10.
    pub launch_potential_score: Option<f64>,
    /// 0-1.
    pub success_probability: Option<f64>,
    /// 1-5 stars.
    pub average_competitor_rating: Option<f64>,
}

/// Market price signal extracted from the service's price band.
#[derive(Debug, Clone, Copy)]
pub struct MarketPrice {
    pub average: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// The normalized, fully-defaulted view the pipeline consumes.
#[derive(Debug, Clone)]
pub struct AiAnalysis {
    pub estimated_competitors: u32,
    /// False when the count came from niche defaults instead of the service.
    pub competitors_reported: bool,
    pub phase_hint: Option<SaturationPhase>,
    pub market_price: Option<MarketPrice>,
    pub launch_potential_score: Option<f64>,
    pub success_probability: Option<f64>,
    pub average_competitor_rating: Option<f64>,
    pub niche_match: bool,
    pub visual_description: String,
    pub etsy_search_query: String,
    pub seo_tags: Vec<String>,
    pub quality: QualityPerception,
    pub originality: f64,
    pub personalization: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("HTTP status {status}: {body}")]
    Http { status: u16, body: String },
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("timed out waiting for the analysis service")]
    Timeout,
    #[error("analysis already in progress")]
    InProgress,
    #[error("response missing required field: {0}")]
    MissingField(&'static str),
}
