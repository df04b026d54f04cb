//! Saturation phase and decline-risk derivation.

use common::{DeclineRisk, MarketStructure, SaturationOutlook, SaturationPhase};
use rand::Rng;

fn derive_phase(total_competitors: u32, rng: &mut impl Rng) -> (SaturationPhase, f64) {
    match total_competitors {
        0..=5 => (SaturationPhase::Launch, 10.0),
        6..=20 => (SaturationPhase::Growth, f64::from(rng.gen_range(15..=35u32))),
        21..=50 => (SaturationPhase::Growth, f64::from(rng.gen_range(30..=80u32))),
        51..=100 => (
            SaturationPhase::Saturation,
            f64::from(rng.gen_range(55..=95u32)),
        ),
        _ => (
            SaturationPhase::Saturation,
            f64::from(rng.gen_range(75..=95u32)),
        ),
    }
}

fn base_decline_risk(phase: SaturationPhase) -> DeclineRisk {
    match phase {
        SaturationPhase::Decline => DeclineRisk::High,
        SaturationPhase::Saturation => DeclineRisk::Medium,
        SaturationPhase::Launch | SaturationPhase::Growth => DeclineRisk::Low,
    }
}

/// Derive the saturation outlook for a market.
///
/// The probability band comes from the listing count. A phase hint (from
/// the analysis service) replaces the count-derived phase label when
/// present; the count-derived mapping itself never produces Decline. A
/// dominated market adds 15 points of saturation probability (capped at
/// 95) and raises a Low decline risk to Medium.
pub fn saturation_outlook(
    total_competitors: u32,
    structure: MarketStructure,
    phase_hint: Option<SaturationPhase>,
    rng: &mut impl Rng,
) -> SaturationOutlook {
    let (derived_phase, mut probability) = derive_phase(total_competitors, rng);
    let phase = phase_hint.unwrap_or(derived_phase);
    let mut decline_risk = base_decline_risk(phase);

    if structure == MarketStructure::Dominated {
        probability = (probability + 15.0).min(95.0);
        if decline_risk == DeclineRisk::Low {
            decline_risk = DeclineRisk::Medium;
        }
    }

    SaturationOutlook {
        phase,
        saturation_probability: probability,
        decline_risk,
    }
}
