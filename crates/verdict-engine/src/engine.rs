//! Verdict scoring and the override ladder.
//!
//! The additive score drives confidence and the initial label; the
//! competitor-tier rule then has the final say on the label, and the
//! niche-mismatch and category rules adjust verdict and confidence
//! after everything else.

use common::{MarketStructure, ProductCategory, SaturationPhase, Verdict, VerdictKind};
use tracing::debug;

use crate::types::VerdictInputs;

const BASE_SCORE: f64 = 40.0;
const LAUNCH_THRESHOLD: f64 = 70.0;
const TEST_THRESHOLD: f64 = 45.0;
/// Competitor ratings below this leave room to win on quality.
const QUALITY_OPPORTUNITY_RATING: f64 = 4.3;

fn structure_adjustment(structure: MarketStructure) -> (f64, &'static str) {
    match structure {
        MarketStructure::Open => (25.0, "open market"),
        MarketStructure::Fragmented => (5.0, "fragmented market"),
        MarketStructure::Dominated => (-20.0, "dominated market"),
    }
}

fn competitor_adjustment(total_competitors: u32) -> f64 {
    match total_competitors {
        0..=20 => 20.0,
        21..=40 => 10.0,
        41..=90 => -5.0,
        91..=130 => -15.0,
        _ => -25.0,
    }
}

fn phase_adjustment(phase: SaturationPhase) -> (f64, &'static str) {
    match phase {
        SaturationPhase::Launch => (15.0, "launch phase"),
        SaturationPhase::Growth => (10.0, "growth phase"),
        SaturationPhase::Saturation => (-20.0, "saturated phase"),
        SaturationPhase::Decline => (-30.0, "declining phase"),
    }
}

fn base_score(inputs: &VerdictInputs) -> (f64, Vec<String>) {
    let mut score = BASE_SCORE;
    let mut factors = Vec::new();

    let (adjustment, label) = structure_adjustment(inputs.market_structure);
    score += adjustment;
    factors.push(format!("{}: {:+.0}", label, adjustment));

    let adjustment = competitor_adjustment(inputs.total_competitors);
    score += adjustment;
    factors.push(format!(
        "{} competitors: {:+.0}",
        inputs.total_competitors, adjustment
    ));

    let (adjustment, label) = phase_adjustment(inputs.phase);
    score += adjustment;
    factors.push(format!("{}: {:+.0}", label, adjustment));

    if inputs.saturation_probability > 70.0 {
        score -= 15.0;
        factors.push(format!(
            "saturation probability {:.0}%: -15",
            inputs.saturation_probability
        ));
    } else if inputs.saturation_probability > 50.0 {
        score -= 5.0;
        factors.push(format!(
            "saturation probability {:.0}%: -5",
            inputs.saturation_probability
        ));
    }

    if inputs.margin_at_recommended < 20.0 {
        score -= 15.0;
        factors.push(format!(
            "margin {:.0}% at recommended price: -15",
            inputs.margin_at_recommended
        ));
    } else if inputs.margin_at_recommended < 30.0 {
        score -= 5.0;
        factors.push(format!(
            "margin {:.0}% at recommended price: -5",
            inputs.margin_at_recommended
        ));
    } else if inputs.margin_at_recommended > 40.0 {
        score += 5.0;
        factors.push(format!(
            "margin {:.0}% at recommended price: +5",
            inputs.margin_at_recommended
        ));
    }

    if let Some(probability) = inputs.success_probability {
        if probability >= 0.7 {
            score += 5.0;
            factors.push(format!("success probability {:.2}: +5", probability));
        } else if probability <= 0.4 {
            score -= 10.0;
            factors.push(format!("success probability {:.2}: -10", probability));
        }
    }

    if let Some(rating) = inputs.average_competitor_rating {
        if rating < QUALITY_OPPORTUNITY_RATING {
            score += 5.0;
            factors.push(format!("quality opportunity, avg rating {:.1}: +5", rating));
        }
    }

    (score.clamp(0.0, 100.0), factors)
}

fn summary_text(verdict: VerdictKind, inputs: &VerdictInputs, score: f64) -> String {
    let phase = match inputs.phase {
        SaturationPhase::Launch => "launch",
        SaturationPhase::Growth => "growth",
        SaturationPhase::Saturation => "saturation",
        SaturationPhase::Decline => "decline",
    };
    let structure = match inputs.market_structure {
        MarketStructure::Open => "open",
        MarketStructure::Fragmented => "fragmented",
        MarketStructure::Dominated => "dominated",
    };
    let readout = format!(
        "{} competitors, {} market, {} phase, score {:.0}/100",
        inputs.total_competitors, structure, phase, score
    );
    match verdict {
        VerdictKind::Launch => format!("Favorable window to launch: {}.", readout),
        VerdictKind::Test => format!("Run a small test batch first: {}.", readout),
        VerdictKind::Avoid => format!("Hold off on this product: {}.", readout),
    }
}

/// Combine all upstream estimates into the final verdict.
pub fn synthesize_verdict(inputs: &VerdictInputs) -> Verdict {
    let (score, mut factors) = base_score(inputs);

    let mut verdict = if score >= LAUNCH_THRESHOLD {
        VerdictKind::Launch
    } else if score >= TEST_THRESHOLD {
        VerdictKind::Test
    } else {
        VerdictKind::Avoid
    };

    if inputs.total_competitors > 100 {
        if inputs.phase == SaturationPhase::Saturation {
            verdict = VerdictKind::Avoid;
        } else if verdict == VerdictKind::Launch {
            verdict = VerdictKind::Test;
        }
    }

    // Competitor tiers have the final say on the label.
    let tier_verdict = match inputs.total_competitors {
        0..=40 => VerdictKind::Launch,
        41..=90 => VerdictKind::Test,
        _ => VerdictKind::Avoid,
    };
    if tier_verdict != verdict {
        factors.push(format!(
            "competitor tier override: {:?} -> {:?}",
            verdict, tier_verdict
        ));
    }
    let mut verdict = tier_verdict;

    let mut confidence = score;
    if !inputs.niche_match {
        verdict = VerdictKind::Avoid;
        confidence = confidence.clamp(20.0, 35.0);
        factors.push("niche mismatch: verdict forced to avoid".to_string());
    }

    let mut summary = summary_text(verdict, inputs, score);
    if !inputs.niche_match {
        summary.insert_str(0, "Product visual does not match the selected niche. ");
    }

    // Category confidence rules win over every prior computation.
    confidence = match inputs.category {
        ProductCategory::Jewelry => (1.0 + score / 100.0 * 1.99).clamp(1.0, 2.99),
        ProductCategory::Bag => 4.0,
        ProductCategory::Baby => score.clamp(7.0, 95.0),
        ProductCategory::Other => confidence,
    };
    if inputs.category != ProductCategory::Other {
        factors.push(format!("{:?} category confidence rule", inputs.category));
    }

    debug!(?verdict, confidence, score, "synthesized verdict");

    Verdict {
        verdict,
        confidence_score: confidence,
        summary,
        factors,
    }
}
