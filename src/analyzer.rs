use std::path::PathBuf;

use ai_client::{normalize, AiAnalysis, AiClient, AiError, AiRequest};
use chrono::Utc;
use common::{
    detect_category, AnalysisRequest, AnalysisResult, DataSource, ListingContent, ProductError,
    SourcedProduct,
};
use market_engine::{estimate_competitors, saturation_outlook};
use pricing_engine::{
    compute_price_floor, recommend_price, CostBasis, MarketContext, PriceRange, PricingError,
    ESTIMATED_MARKET_MULTIPLIER,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use simulation_engine::{simulate_launch, ProjectionInputs};
use tracing::{debug, info, warn};
use uuid::Uuid;
use verdict_engine::{synthesize_verdict, VerdictInputs};

use crate::budget::AiBudget;
use crate::config::AppConfig;
use crate::fallback::{emergency_result, fallback_analysis, ESTIMATED_COST_RATE};
use crate::journal::{resolve_analyses_dir, AnalysisJournal};

/// One-shot, request-scoped analysis orchestrator.
///
/// Holds no state between analyses beyond the journal, the AI budget
/// file, and the sampling rng.
pub struct Analyzer {
    config: AppConfig,
    ai_client: Option<AiClient>,
    budget: AiBudget,
    journal: AnalysisJournal,
    rng: StdRng,
}

impl Analyzer {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let data_dir = config
            .data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(resolve_analyses_dir);

        let mut journal = AnalysisJournal::open(data_dir.clone())?;
        journal.write_event(
            "analyzer_start",
            json!({
                "ai_enabled": config.ai.enabled,
                "ai_base_url": config.ai.base_url,
                "ai_timeout_ms": config.ai.timeout_ms
            }),
        );
        info!("Analysis journal path: {}", journal.dir().display());

        let budget = AiBudget::load(config.budget.clone(), &data_dir)?;

        let ai_client = if config.ai.enabled {
            let api_key = std::env::var(&config.ai.api_key_env).ok();
            Some(AiClient::new(
                config.ai.base_url.clone(),
                api_key,
                config.ai.timeout_ms,
            ))
        } else {
            None
        };

        let rng = match config.fallback.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            ai_client,
            budget,
            journal,
            rng,
        })
    }

    fn ai_error_code(err: &AiError) -> &'static str {
        match err {
            AiError::Timeout => "AI_TIMEOUT",
            AiError::Http { .. } => "AI_HTTP_ERROR",
            AiError::Request(_) => "AI_REQUEST_ERROR",
            AiError::Json(_) => "AI_JSON_ERROR",
            AiError::InProgress => "AI_IN_PROGRESS",
            AiError::MissingField(_) => "AI_MISSING_FIELD",
        }
    }

    /// Analyze one sourced product.
    ///
    /// This never fails except for a product with no reference image;
    /// every other problem degrades to fallback or emergency output.
    pub async fn analyze(
        &mut self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, ProductError> {
        let product = &request.product;
        let image_url = product
            .reference_image()
            .ok_or(ProductError::MissingImage)?
            .to_string();

        self.journal.write_event(
            "analysis_started",
            json!({
                "product": product.identity(),
                "niche": product.niche,
                "advertising": request.advertising
            }),
        );

        let result = match self.request_ai_analysis(product, &image_url).await {
            Some(analysis) => {
                match self.run_pipeline(product, &analysis, request.advertising, DataSource::Real) {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("pipeline rejected service data: {}; falling back", e);
                        self.journal.write_event(
                            "fallback_used",
                            json!({
                                "product": product.identity(),
                                "reason": e.to_string()
                            }),
                        );
                        self.fallback_result(product, request.advertising)
                    }
                }
            }
            None => {
                self.journal.write_event(
                    "fallback_used",
                    json!({
                        "product": product.identity(),
                        "reason": "no usable service analysis"
                    }),
                );
                self.fallback_result(product, request.advertising)
            }
        };

        self.journal.write_event(
            "analysis_completed",
            json!({
                "analysis_id": result.analysis_id,
                "product": product.identity(),
                "verdict": result.verdict.verdict,
                "confidence": result.verdict.confidence_score,
                "recommended_price": result.pricing.recommended_price,
                "data_source": result.data_source
            }),
        );

        Ok(result)
    }

    /// One budgeted attempt against the AI service. Any failure comes
    /// back as `None`; the caller owns the fallback.
    async fn request_ai_analysis(
        &mut self,
        product: &SourcedProduct,
        image_url: &str,
    ) -> Option<AiAnalysis> {
        let client = self.ai_client.as_ref()?;

        if !self.budget.can_spend_call(product.identity()) {
            let (daily_used, daily_max, product_used, product_max) =
                self.budget.usage_snapshot(product.identity());
            self.journal.write_event(
                "ai_budget_exhausted",
                json!({
                    "product": product.identity(),
                    "daily_calls_used": daily_used,
                    "daily_calls_max": daily_max,
                    "product_calls_used": product_used,
                    "product_calls_max": product_max
                }),
            );
            return None;
        }
        if let Err(e) = self.budget.record_call(product.identity()) {
            warn!("budget state persistence failed: {}", e);
        }

        let ai_request = AiRequest {
            request_id: Uuid::new_v4(),
            price: product.price,
            niche: product.niche.clone(),
            image_url: image_url.to_string(),
        };
        self.journal.write_event(
            "ai_requested",
            json!({
                "product": product.identity(),
                "request_id": ai_request.request_id
            }),
        );

        let outcome = client
            .analyze(&ai_request)
            .await
            .and_then(|raw| normalize(raw, &product.niche, &mut self.rng));

        match outcome {
            Ok(analysis) => {
                self.journal.write_event(
                    "ai_accepted",
                    json!({
                        "product": product.identity(),
                        "request_id": ai_request.request_id,
                        "competitors": analysis.estimated_competitors,
                        "niche_match": analysis.niche_match
                    }),
                );
                Some(analysis)
            }
            Err(AiError::InProgress) => {
                // Expected duplicate-submission signal, not an error.
                debug!("analysis already running upstream; routing to fallback");
                self.journal.write_event(
                    "ai_in_progress",
                    json!({
                        "product": product.identity(),
                        "request_id": ai_request.request_id
                    }),
                );
                None
            }
            Err(e) => {
                let code = Self::ai_error_code(&e);
                warn!("AI analysis failed for {}: {}", product.identity(), e);
                self.journal.write_event(
                    "ai_error",
                    json!({
                        "product": product.identity(),
                        "request_id": ai_request.request_id,
                        "code": code,
                        "error": e.to_string()
                    }),
                );
                None
            }
        }
    }

    fn fallback_result(&mut self, product: &SourcedProduct, advertising: bool) -> AnalysisResult {
        let analysis = fallback_analysis(product, &mut self.rng);
        match self.run_pipeline(product, &analysis, advertising, DataSource::Estimated) {
            Ok(result) => result,
            Err(e) => {
                warn!("fallback pipeline failed: {}; using emergency defaults", e);
                self.journal.write_event(
                    "emergency_used",
                    json!({
                        "product": product.identity(),
                        "reason": e.to_string()
                    }),
                );
                emergency_result(product, advertising)
            }
        }
    }

    /// The shared estimation pipeline. Real and fallback data flow
    /// through the same steps; only the cost basis differs.
    fn run_pipeline(
        &mut self,
        product: &SourcedProduct,
        analysis: &AiAnalysis,
        advertising: bool,
        data_source: DataSource,
    ) -> Result<AnalysisResult, PricingError> {
        let cost = match data_source {
            DataSource::Real => CostBasis {
                supplier_price: product.price,
                shipping_cost: self.config.pricing.default_shipping_cost,
            },
            DataSource::Estimated => CostBasis {
                supplier_price: ESTIMATED_COST_RATE * product.price,
                shipping_cost: self.config.pricing.default_shipping_cost,
            },
        };
        let floor = compute_price_floor(&cost)?;

        let average_market_price = analysis
            .market_price
            .map(|p| p.average)
            .unwrap_or(floor.total_cost * ESTIMATED_MARKET_MULTIPLIER);
        let market_price_range = analysis.market_price.and_then(|p| match (p.min, p.max) {
            (Some(min), Some(max)) => Some(PriceRange { min, max }),
            _ => None,
        });
        let market = MarketContext {
            average_market_price,
            market_price_range,
            quality: analysis.quality,
            originality: analysis.originality,
            personalization: analysis.personalization,
            competition_volume: analysis.estimated_competitors,
        };
        let pricing = recommend_price(&floor, &market);

        let reliable = data_source == DataSource::Real && analysis.competitors_reported;
        let competitors =
            estimate_competitors(analysis.estimated_competitors, reliable, &mut self.rng);
        let saturation = saturation_outlook(
            analysis.estimated_competitors,
            competitors.market_structure,
            analysis.phase_hint,
            &mut self.rng,
        );

        let launch = simulate_launch(
            analysis.launch_potential_score,
            competitors.market_structure,
            &ProjectionInputs {
                selling_price: pricing.recommended_price,
                unit_cost: floor.total_cost,
                advertising,
            },
        );

        let category = detect_category(&product.niche, &analysis.visual_description);
        let verdict = synthesize_verdict(&VerdictInputs {
            total_competitors: competitors.total_competitors,
            market_structure: competitors.market_structure,
            phase: saturation.phase,
            saturation_probability: saturation.saturation_probability,
            margin_at_recommended: pricing.margins.recommended.margin_pct,
            success_probability: analysis.success_probability,
            average_competitor_rating: analysis.average_competitor_rating,
            niche_match: analysis.niche_match,
            category,
        });

        let mut warnings = Vec::new();
        if let Some(warning) = &pricing.warning {
            warnings.push(warning.clone());
        }
        if data_source == DataSource::Estimated {
            warnings.push(
                "analysis service unavailable; competition and pricing are local estimates"
                    .to_string(),
            );
        }
        if !analysis.niche_match {
            warnings.push(
                "product visual does not match the selected niche; verdict forced to avoid"
                    .to_string(),
            );
        }

        Ok(AnalysisResult {
            analysis_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            niche: product.niche.clone(),
            competitors,
            saturation,
            pricing,
            launch,
            verdict,
            listing: ListingContent {
                etsy_search_query: analysis.etsy_search_query.clone(),
                seo_tags: analysis.seo_tags.clone(),
            },
            data_source,
            warnings,
        })
    }
}
