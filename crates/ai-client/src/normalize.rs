//! Turn the untrusted service payload into a fully-defaulted
//! [`AiAnalysis`], or reject it when the required signal is missing.

use common::{default_competitors, QualityPerception, SaturationPhase};
use rand::Rng;

use crate::types::{AiAnalysis, AiError, MarketPrice, RawAiResponse};

/// Etsy listings carry exactly this many tags.
pub const SEO_TAG_COUNT: usize = 13;

/// Generic terms used to pad short tag lists up to the Etsy limit.
const FILLER_TAGS: [&str; SEO_TAG_COUNT] = [
    "handmade",
    "gift for her",
    "gift idea",
    "custom gift",
    "unique",
    "boutique style",
    "artisan",
    "trending",
    "bestseller",
    "personalized gift",
    "home style",
    "aesthetic",
    "limited edition",
];

fn parse_phase(level: &str) -> Option<SaturationPhase> {
    match level.trim().to_lowercase().as_str() {
        "launch" => Some(SaturationPhase::Launch),
        "growth" => Some(SaturationPhase::Growth),
        "saturation" | "saturated" => Some(SaturationPhase::Saturation),
        "decline" | "declining" => Some(SaturationPhase::Decline),
        _ => None,
    }
}

fn parse_quality(value: &str) -> QualityPerception {
    match value.trim().to_lowercase().as_str() {
        "premium" => QualityPerception::Premium,
        "entry" | "budget" => QualityPerception::Entry,
        _ => QualityPerception::Standard,
    }
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if tag.is_empty() || tags.len() >= SEO_TAG_COUNT {
        return;
    }
    if !tags.iter().any(|existing| *existing == tag) {
        tags.push(tag);
    }
}

/// Build the Etsy search query from the visual description. The
/// supplier-side product title is deliberately never an input here.
pub fn synthesize_search_query(visual_description: &str, niche: &str) -> String {
    let words: Vec<&str> = visual_description
        .split_whitespace()
        .filter(|word| word.len() > 2)
        .take(6)
        .collect();
    if words.is_empty() {
        niche.trim().to_lowercase()
    } else {
        words.join(" ").to_lowercase()
    }
}

/// Force the tag list to exactly [`SEO_TAG_COUNT`] entries: trim,
/// lowercase, drop duplicates, keep the niche itself as a tag, then pad
/// with fillers.
pub fn normalize_seo_tags(raw: &[String], niche: &str) -> Vec<String> {
    let mut tags = Vec::with_capacity(SEO_TAG_COUNT);
    for tag in raw {
        push_unique(&mut tags, tag.trim().to_lowercase());
    }
    push_unique(&mut tags, niche.trim().to_lowercase());
    for filler in FILLER_TAGS {
        push_unique(&mut tags, filler.to_string());
    }
    tags
}

/// Normalize a raw service payload.
///
/// # Errors
///
/// [`AiError::InProgress`] when the service reports a duplicate request
/// already running; [`AiError::MissingField`] when the payload carries
/// neither a competitor count nor a usable price band.
pub fn normalize(
    raw: RawAiResponse,
    niche: &str,
    rng: &mut impl Rng,
) -> Result<AiAnalysis, AiError> {
    if let Some(status) = raw.status.as_deref() {
        let status = status.trim().to_lowercase();
        if status == "in_progress" || status == "processing" {
            return Err(AiError::InProgress);
        }
    }

    let market_price = raw.recommended_price.and_then(|band| {
        let average = band.optimal.or(match (band.min, band.max) {
            (Some(low), Some(high)) => Some((low + high) / 2.0),
            _ => None,
        })?;
        if !average.is_finite() || average <= 0.0 {
            return None;
        }
        Some(MarketPrice {
            average,
            min: band.min,
            max: band.max,
        })
    });

    if raw.estimated_competitors.is_none() && market_price.is_none() {
        return Err(AiError::MissingField(
            "estimated_competitors or recommended_price",
        ));
    }

    let competitors_reported = raw.estimated_competitors.is_some();
    let estimated_competitors = raw
        .estimated_competitors
        .unwrap_or_else(|| default_competitors(niche, rng));

    let launch = raw.launch_estimate.unwrap_or_default();
    let visual_description = raw.product_visual_description.unwrap_or_default();
    let etsy_search_query = match raw.etsy_search_query {
        Some(query) if !query.trim().is_empty() => query.trim().to_lowercase(),
        _ => synthesize_search_query(&visual_description, niche),
    };
    let seo_tags = normalize_seo_tags(raw.seo_tags.as_deref().unwrap_or(&[]), niche);

    Ok(AiAnalysis {
        estimated_competitors,
        competitors_reported,
        phase_hint: raw.saturation_level.as_deref().and_then(parse_phase),
        market_price,
        launch_potential_score: launch.launch_potential_score.map(|s| s.clamp(0.0, 10.0)),
        success_probability: launch.success_probability.map(|p| p.clamp(0.0, 1.0)),
        average_competitor_rating: launch.average_competitor_rating.map(|r| r.clamp(1.0, 5.0)),
        niche_match: raw.niche_match.unwrap_or(true),
        visual_description,
        etsy_search_query,
        seo_tags,
        quality: raw
            .quality_perception
            .as_deref()
            .map(parse_quality)
            .unwrap_or(QualityPerception::Standard),
        originality: raw.originality.map(|o| o.clamp(0.0, 1.0)).unwrap_or(0.5),
        personalization: raw.personalization.unwrap_or(false),
    })
}
