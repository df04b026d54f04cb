//! Market structure classification from competitor counts.

use common::{CompetitorEstimate, MarketStructure};
use rand::Rng;
use tracing::debug;

/// Coarse 0-100 competition score for a listing count, used when no
/// externally supplied score is available.
pub fn competition_score(total_competitors: u32) -> u8 {
    match total_competitors {
        0..=40 => 25,
        41..=90 => 50,
        91..=130 => 75,
        _ => 90,
    }
}

/// Classify market structure and, for crowded markets, estimate how many
/// stronger sellers lead it.
pub fn classify_structure(
    total_competitors: u32,
    rng: &mut impl Rng,
) -> (MarketStructure, Option<u32>) {
    if total_competitors > 100 {
        (MarketStructure::Fragmented, Some(rng.gen_range(3..=8)))
    } else if total_competitors > 50 {
        let structure = if rng.gen_bool(0.5) {
            MarketStructure::Dominated
        } else {
            MarketStructure::Fragmented
        };
        (structure, None)
    } else {
        (MarketStructure::Open, None)
    }
}

/// Build the competitor estimate with a human-readable reasoning line.
pub fn estimate_competitors(
    total_competitors: u32,
    reliable: bool,
    rng: &mut impl Rng,
) -> CompetitorEstimate {
    let (market_structure, dominant_sellers) = classify_structure(total_competitors, rng);
    let score = competition_score(total_competitors);

    let shape = match market_structure {
        MarketStructure::Open => "room for new entrants",
        MarketStructure::Fragmented => "many small shops splitting demand",
        MarketStructure::Dominated => "a few established shops hold most sales",
    };
    let mut reasoning = format!(
        "{} active listings scores {}/100 for competition; {}",
        total_competitors, score, shape
    );
    if let Some(leaders) = dominant_sellers {
        reasoning.push_str(&format!(", led by ~{} stronger sellers", leaders));
    }
    if !reliable {
        reasoning.push_str(" (count estimated from niche defaults)");
    }

    debug!(total_competitors, ?market_structure, reliable, "classified market");

    CompetitorEstimate {
        total_competitors,
        market_structure,
        dominant_sellers,
        reliable,
        reasoning,
    }
}
