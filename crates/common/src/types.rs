//! Domain types shared across the analyzer pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product sourced from a supplier catalog, as submitted for analysis.
///
/// Immutable once handed to the estimator. The `title` is supplier-side
/// display text and is never used to derive Etsy-facing keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcedProduct {
    /// Supplier-side price for one unit.
    pub price: f64,
    /// Supplier listing title. Display only.
    #[serde(default)]
    pub title: String,
    /// Ordered image URLs; the first entry is the canonical reference image.
    #[serde(default)]
    pub images: Vec<String>,
    /// Seller-chosen niche tag (e.g. "jewelry", "home-decor").
    pub niche: String,
}

impl SourcedProduct {
    /// Canonical reference image, when the product has one.
    pub fn reference_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }

    /// Stable identity used for budget accounting and persistence keys.
    /// The canonical image URL identifies a sourced product across repeat
    /// submissions.
    pub fn identity(&self) -> &str {
        self.reference_image().unwrap_or("")
    }
}

/// One analysis invocation as read from the request document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub product: SourcedProduct,
    /// Simulate the listing with Etsy ads enabled (the projection's
    /// what-if lever).
    #[serde(default)]
    pub advertising: bool,
}

/// How the competitive field is organized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStructure {
    Open,
    Fragmented,
    Dominated,
}

/// Market lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationPhase {
    Launch,
    Growth,
    Saturation,
    Decline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineRisk {
    Low,
    Medium,
    High,
}

/// Whether the result came from the live AI call or fallback synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Real,
    Estimated,
}

/// Where the recommended price sits relative to the market average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePositioning {
    Low,
    Standard,
    Premium,
}

/// Perceived quality tier of the product against its competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPerception {
    Entry,
    Standard,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    Launch,
    Test,
    Avoid,
}

/// Competitive-field estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorEstimate {
    pub total_competitors: u32,
    pub market_structure: MarketStructure,
    /// Estimated number of sellers holding most of the volume, when the
    /// field is large enough to tell.
    pub dominant_sellers: Option<u32>,
    /// False when the count was synthesized rather than observed.
    pub reliable: bool,
    pub reasoning: String,
}

/// Saturation-phase outlook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaturationOutlook {
    pub phase: SaturationPhase,
    /// 0-100.
    pub saturation_probability: f64,
    pub decline_risk: DeclineRisk,
}

/// Profitability at one price point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarginAnalysis {
    pub price: f64,
    pub profit: f64,
    pub margin_pct: f64,
}

/// Margin breakdown across the three price tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierMargins {
    pub aggressive: MarginAnalysis,
    pub recommended: MarginAnalysis,
    pub premium: MarginAnalysis,
}

/// Pricing recommendation with floor and ceiling tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRecommendation {
    pub recommended_price: f64,
    /// Floor tier; never below the non-loss minimum.
    pub aggressive_price: f64,
    /// Ceiling tier.
    pub premium_price: f64,
    pub positioning: PricePositioning,
    pub margins: TierMargins,
    /// Present when the market average sat below the cost floor and the
    /// floor price was held instead.
    pub warning: Option<String>,
}

/// Day estimate bracket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DayRange {
    pub min: f64,
    pub max: f64,
    pub expected: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeToFirstSale {
    pub without_ads: DayRange,
    pub with_ads: DayRange,
}

/// One projection scenario over the three-month window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionTier {
    pub estimated_sales: u32,
    pub estimated_revenue: f64,
    pub estimated_profit: f64,
    pub margin_percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThreeMonthProjection {
    pub conservative: ProjectionTier,
    pub realistic: ProjectionTier,
    pub optimistic: ProjectionTier,
}

/// Launch-timing estimates plus projected three-month outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSimulation {
    pub time_to_first_sale: TimeToFirstSale,
    pub three_month: ThreeMonthProjection,
    /// Whether the projection includes the simulated ad spend.
    pub advertising_enabled: bool,
}

/// Final launch decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub verdict: VerdictKind,
    /// 0-100. Category rules may force narrower sub-ranges.
    pub confidence_score: f64,
    pub summary: String,
    /// Individual scoring adjustments, for transparency and journaling.
    pub factors: Vec<String>,
}

/// Etsy-facing listing content derived from the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingContent {
    pub etsy_search_query: String,
    /// Always exactly 13 entries.
    pub seo_tags: Vec<String>,
}

/// The one normalized result object handed to the presentation layer.
/// Created once per analysis request and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub niche: String,
    pub competitors: CompetitorEstimate,
    pub saturation: SaturationOutlook,
    pub pricing: PricingRecommendation,
    pub launch: LaunchSimulation,
    pub verdict: Verdict,
    pub listing: ListingContent,
    pub data_source: DataSource,
    #[serde(default)]
    pub warnings: Vec<String>,
}
