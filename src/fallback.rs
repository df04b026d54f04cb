use ai_client::{normalize_seo_tags, synthesize_search_query, AiAnalysis};
use chrono::Utc;
use common::{
    default_competitors, detect_category, AnalysisResult, CompetitorEstimate, DataSource,
    DeclineRisk, ListingContent, MarketStructure, PricePositioning, PricingRecommendation,
    ProductCategory, QualityPerception, SaturationOutlook, SaturationPhase, SourcedProduct,
    TierMargins, Verdict, VerdictKind,
};
use pricing_engine::margin_analysis;
use rand::Rng;
use simulation_engine::{simulate_launch, ProjectionInputs};
use uuid::Uuid;

/// Supplier cost assumed as this share of the listed price when the
/// analysis service gave us nothing.
pub const ESTIMATED_COST_RATE: f64 = 0.70;

/// Hardcoded shipping for the emergency path, which must not depend on
/// configuration.
const EMERGENCY_SHIPPING_COST: f64 = 5.0;
/// The emergency price never goes under this.
const EMERGENCY_MIN_PRICE: f64 = 29.99;

/// Synthesize the analysis fields from (price, niche) alone, shaped
/// exactly like a normalized service payload so the regular pipeline
/// runs unchanged.
pub fn fallback_analysis(product: &SourcedProduct, rng: &mut impl Rng) -> AiAnalysis {
    AiAnalysis {
        estimated_competitors: default_competitors(&product.niche, rng),
        competitors_reported: false,
        phase_hint: None,
        market_price: None,
        launch_potential_score: None,
        success_probability: None,
        average_competitor_rating: None,
        niche_match: true,
        visual_description: String::new(),
        etsy_search_query: synthesize_search_query("", &product.niche),
        seo_tags: normalize_seo_tags(&[], &product.niche),
        quality: QualityPerception::Standard,
        originality: 0.5,
        personalization: false,
    }
}

/// Last-resort result when even the fallback pipeline could not build
/// valid data. Inputs are hardcoded minimal values; nothing here can
/// fail.
pub fn emergency_result(product: &SourcedProduct, advertising: bool) -> AnalysisResult {
    let total_cost = ESTIMATED_COST_RATE * product.price.max(0.0) + EMERGENCY_SHIPPING_COST;
    // Triple multiplier unconditionally; it clears the floor rule at
    // every cost level.
    let recommended = ((total_cost * 3.0).max(EMERGENCY_MIN_PRICE) * 100.0).round() / 100.0;
    let premium = (recommended * 1.3 * 100.0).round() / 100.0;

    let pricing = PricingRecommendation {
        recommended_price: recommended,
        aggressive_price: recommended,
        premium_price: premium,
        positioning: PricePositioning::Standard,
        margins: TierMargins {
            aggressive: margin_analysis(recommended, total_cost),
            recommended: margin_analysis(recommended, total_cost),
            premium: margin_analysis(premium, total_cost),
        },
        warning: Some("emergency pricing from hardcoded defaults".to_string()),
    };

    let launch = simulate_launch(
        None,
        MarketStructure::Open,
        &ProjectionInputs {
            selling_price: recommended,
            unit_cost: total_cost,
            advertising,
        },
    );

    // Category confidence rules hold even here.
    let confidence = match detect_category(&product.niche, "") {
        ProductCategory::Jewelry => 2.0,
        ProductCategory::Bag => 4.0,
        ProductCategory::Baby | ProductCategory::Other => 40.0,
    };

    AnalysisResult {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        niche: product.niche.clone(),
        competitors: CompetitorEstimate {
            total_competitors: 50,
            market_structure: MarketStructure::Open,
            dominant_sellers: None,
            reliable: false,
            reasoning: "emergency defaults; treat competition as unknown".to_string(),
        },
        saturation: SaturationOutlook {
            phase: SaturationPhase::Growth,
            saturation_probability: 50.0,
            decline_risk: DeclineRisk::Medium,
        },
        pricing,
        launch,
        verdict: Verdict {
            verdict: VerdictKind::Test,
            confidence_score: confidence,
            summary: "Emergency defaults; verify pricing and competition manually before launching."
                .to_string(),
            factors: vec!["emergency defaults".to_string()],
        },
        listing: ListingContent {
            etsy_search_query: synthesize_search_query("", &product.niche),
            seo_tags: normalize_seo_tags(&[], &product.niche),
        },
        data_source: DataSource::Estimated,
        warnings: vec![
            "analysis service and local estimation both failed; every value is a rough default"
                .to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_client::SEO_TAG_COUNT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn make_product(price: f64, niche: &str) -> SourcedProduct {
        SourcedProduct {
            price,
            title: "supplier widget".to_string(),
            images: vec!["https://img.example/a.jpg".to_string()],
            niche: niche.to_string(),
        }
    }

    #[test]
    fn fallback_fields_come_from_price_and_niche_only() {
        let mut rng = StdRng::seed_from_u64(5);
        let analysis = fallback_analysis(&make_product(12.0, "wedding jewelry"), &mut rng);

        assert!(!analysis.competitors_reported);
        assert!((100..=160).contains(&analysis.estimated_competitors));
        assert!(analysis.market_price.is_none());
        assert!(analysis.launch_potential_score.is_none());
        assert!(analysis.niche_match);
        assert_eq!(analysis.seo_tags.len(), SEO_TAG_COUNT);
        assert_eq!(analysis.etsy_search_query, "wedding jewelry");
    }

    #[test]
    fn generic_niche_falls_back_to_moderate_competition() {
        let mut rng = StdRng::seed_from_u64(5);
        let analysis = fallback_analysis(&make_product(12.0, "desk organizer"), &mut rng);
        assert!((35..=85).contains(&analysis.estimated_competitors));
    }

    #[test]
    fn emergency_result_is_complete_and_marked_estimated() {
        let result = emergency_result(&make_product(100.0, "mugs"), false);

        // 0.7 * 100 + 5 = 75 total cost; tripled to 225.
        assert_eq!(result.pricing.recommended_price, 225.0);
        assert!(result.pricing.recommended_price > 75.0);
        assert_eq!(result.data_source, DataSource::Estimated);
        assert!(!result.warnings.is_empty());
        assert_eq!(result.verdict.verdict, VerdictKind::Test);
        assert_eq!(result.listing.seo_tags.len(), SEO_TAG_COUNT);
        assert!(result.launch.three_month.conservative.estimated_sales >= 1);
    }

    #[test]
    fn emergency_price_never_drops_below_the_floor_price() {
        let result = emergency_result(&make_product(0.0, "mugs"), false);
        // Total cost 5.0, tripled is 15, raised to the 29.99 minimum.
        assert_eq!(result.pricing.recommended_price, 29.99);
    }

    #[test]
    fn emergency_swallows_a_nan_price() {
        let result = emergency_result(&make_product(f64::NAN, "mugs"), true);
        assert_eq!(result.pricing.recommended_price, 29.99);
        assert!(result.launch.advertising_enabled);
    }

    #[test]
    fn category_confidence_rules_hold_in_the_emergency_path() {
        let jewelry = emergency_result(&make_product(10.0, "jewelry"), false);
        assert!(jewelry.verdict.confidence_score < 3.0);

        let bags = emergency_result(&make_product(10.0, "tote bag"), false);
        assert_eq!(bags.verdict.confidence_score, 4.0);
    }
}
