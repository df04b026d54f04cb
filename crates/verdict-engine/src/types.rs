use common::{MarketStructure, ProductCategory, SaturationPhase};

/// Everything the verdict scoring formula looks at.
#[derive(Debug, Clone)]
pub struct VerdictInputs {
    pub total_competitors: u32,
    pub market_structure: MarketStructure,
    pub phase: SaturationPhase,
    /// 0-100.
    pub saturation_probability: f64,
    /// Margin percentage at the recommended price.
    pub margin_at_recommended: f64,
    /// 0-1, when the analysis service supplied one.
    pub success_probability: Option<f64>,
    /// Average star rating of competing listings, when known.
    pub average_competitor_rating: Option<f64>,
    /// Whether the product visually matches the selected niche.
    pub niche_match: bool,
    pub category: ProductCategory,
}
