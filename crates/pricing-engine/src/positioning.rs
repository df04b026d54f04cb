//! Market positioning: turn a cost floor plus market context into a
//! three-tier price recommendation.

use common::{
    MarginAnalysis, PricePositioning, PricingRecommendation, QualityPerception, TierMargins,
};
use tracing::debug;

use crate::types::{MarketContext, PriceFloor};

/// Starting markup over the market average.
pub const BASE_COEFFICIENT: f64 = 1.10;
/// Lowest coefficient after all adjustments.
pub const MIN_COEFFICIENT: f64 = 1.05;
/// Highest coefficient after all adjustments.
pub const MAX_COEFFICIENT: f64 = 1.30;
/// Premium tier targets this share of the market average.
pub const PREMIUM_MARKET_RATE: f64 = 1.30;
/// Below this share of the market average a price reads as low.
pub const LOW_POSITION_RATE: f64 = 0.90;
/// Above this share of the market average a price reads as premium.
pub const PREMIUM_POSITION_RATE: f64 = 1.15;
/// Stand-in market average when no real price band is available,
/// expressed as a multiple of total cost.
pub const ESTIMATED_MARKET_MULTIPLIER: f64 = 3.2;

/// Round to cents without ever dipping below the floor price.
pub(crate) fn round_price(value: f64, floor: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded < floor {
        (value * 100.0).ceil() / 100.0
    } else {
        rounded
    }
}

/// Profit and margin for one candidate price against a total cost.
pub fn margin_analysis(price: f64, total_cost: f64) -> MarginAnalysis {
    let profit = price - total_cost;
    let margin_pct = if price > 0.0 {
        profit / price * 100.0
    } else {
        0.0
    };
    MarginAnalysis {
        price,
        profit,
        margin_pct,
    }
}

fn positioning_coefficient(market: &MarketContext) -> f64 {
    let mut coefficient = BASE_COEFFICIENT;
    match market.quality {
        QualityPerception::Premium => coefficient += 0.10,
        QualityPerception::Entry => coefficient -= 0.05,
        QualityPerception::Standard => {}
    }
    if market.originality > 0.7 {
        coefficient += 0.08;
    }
    if market.personalization {
        coefficient += 0.05;
    }
    if market.competition_volume < 30 {
        coefficient += 0.05;
    } else if market.competition_volume > 100 {
        coefficient -= 0.03;
    }
    coefficient.clamp(MIN_COEFFICIENT, MAX_COEFFICIENT)
}

/// Recommend a price from the cost floor and market context.
///
/// The recommended tier is the positioning coefficient applied to the
/// market average, raised to the floor when the market sits below cost.
/// Aggressive is the floor itself; premium is the larger of the
/// recommended price and [`PREMIUM_MARKET_RATE`] times the average.
pub fn recommend_price(floor: &PriceFloor, market: &MarketContext) -> PricingRecommendation {
    let average = market.average_market_price;
    let coefficient = positioning_coefficient(market);

    let mut warning = None;
    let candidate = if average < floor.minimum_price {
        warning = Some(format!(
            "market average {:.2} is below the {:.2} cost floor; holding the floor price",
            average, floor.minimum_price
        ));
        floor.minimum_price
    } else {
        (average * coefficient).max(floor.minimum_price)
    };

    // Multiplier rule holds even if the floor itself came from the
    // safety margin branch.
    let hard_floor = floor
        .minimum_price
        .max(floor.total_cost * floor.required_multiplier);
    let recommended_price = round_price(candidate.max(hard_floor), hard_floor);
    let aggressive_price = round_price(floor.minimum_price, floor.minimum_price);
    let premium_price = round_price(
        recommended_price.max(average * PREMIUM_MARKET_RATE),
        recommended_price,
    );

    let positioning = if recommended_price < average * LOW_POSITION_RATE {
        PricePositioning::Low
    } else if recommended_price > average * PREMIUM_POSITION_RATE {
        PricePositioning::Premium
    } else {
        PricePositioning::Standard
    };

    debug!(
        coefficient,
        recommended_price, aggressive_price, premium_price, "positioned against market average"
    );

    PricingRecommendation {
        recommended_price,
        aggressive_price,
        premium_price,
        positioning,
        margins: TierMargins {
            aggressive: margin_analysis(aggressive_price, floor.total_cost),
            recommended: margin_analysis(recommended_price, floor.total_cost),
            premium: margin_analysis(premium_price, floor.total_cost),
        },
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floor::compute_price_floor;
    use crate::types::CostBasis;

    fn make_floor(supplier_price: f64, shipping_cost: f64) -> PriceFloor {
        compute_price_floor(&CostBasis {
            supplier_price,
            shipping_cost,
        })
        .expect("valid cost basis")
    }

    fn make_market(average_market_price: f64) -> MarketContext {
        MarketContext {
            average_market_price,
            market_price_range: None,
            quality: QualityPerception::Standard,
            originality: 0.5,
            personalization: false,
            competition_volume: 60,
        }
    }

    #[test]
    fn cheap_market_holds_the_floor_with_a_warning() {
        let floor = make_floor(10.0, 5.0);
        let rec = recommend_price(&floor, &make_market(20.0));

        assert_eq!(rec.recommended_price, 45.0);
        assert_eq!(rec.aggressive_price, 45.0);
        assert!(rec.warning.is_some());
        assert_eq!(rec.positioning, PricePositioning::Premium);
    }

    #[test]
    fn standard_market_applies_base_coefficient() {
        let floor = make_floor(8.0, 2.0);
        let rec = recommend_price(&floor, &make_market(40.0));

        // 40 * 1.10 = 44, above the 30.0 floor.
        assert_eq!(rec.recommended_price, 44.0);
        assert_eq!(rec.aggressive_price, 30.0);
        assert!(rec.warning.is_none());
        assert_eq!(rec.positioning, PricePositioning::Standard);
    }

    #[test]
    fn coefficient_caps_at_upper_bound() {
        let floor = make_floor(2.0, 1.0);
        let mut market = make_market(100.0);
        market.quality = QualityPerception::Premium;
        market.originality = 0.9;
        market.personalization = true;
        market.competition_volume = 10;

        // 1.10 + 0.10 + 0.08 + 0.05 + 0.05 = 1.38, clamped to 1.30.
        let rec = recommend_price(&floor, &market);
        assert_eq!(rec.recommended_price, 130.0);
        assert_eq!(rec.positioning, PricePositioning::Premium);
    }

    #[test]
    fn coefficient_caps_at_lower_bound() {
        let floor = make_floor(2.0, 1.0);
        let mut market = make_market(100.0);
        market.quality = QualityPerception::Entry;
        market.competition_volume = 150;

        // 1.10 - 0.05 - 0.03 = 1.02, clamped to 1.05.
        let rec = recommend_price(&floor, &market);
        assert_eq!(rec.recommended_price, 105.0);
    }

    #[test]
    fn premium_tier_tracks_the_market_when_it_pays_more() {
        let floor = make_floor(8.0, 2.0);
        let rec = recommend_price(&floor, &make_market(40.0));

        // 40 * 1.30 = 52 beats the 44.0 recommendation.
        assert_eq!(rec.premium_price, 52.0);
        assert!(rec.premium_price >= rec.recommended_price);
    }

    #[test]
    fn premium_tier_never_drops_below_recommended() {
        let floor = make_floor(30.0, 10.0);
        let rec = recommend_price(&floor, &make_market(50.0));

        // Floor is 120.0, well above 50 * 1.30.
        assert_eq!(rec.premium_price, rec.recommended_price);
    }

    #[test]
    fn every_tier_clears_the_multiplier_floor() {
        for supplier_cents in (50..=15_000u32).step_by(37) {
            let supplier = f64::from(supplier_cents) / 100.0;
            let floor = make_floor(supplier, 5.0);
            for average in [5.0, 20.0, 45.0, 120.0, 400.0] {
                let rec = recommend_price(&floor, &make_market(average));
                let hard_floor = floor.total_cost * floor.required_multiplier;
                assert!(
                    rec.recommended_price >= hard_floor,
                    "recommended {} under floor {} at cost {}",
                    rec.recommended_price,
                    hard_floor,
                    floor.total_cost
                );
                assert!(rec.recommended_price > floor.total_cost);
                assert!(rec.premium_price >= rec.recommended_price);
            }
        }
    }

    #[test]
    fn rounding_never_dips_below_the_floor() {
        assert_eq!(round_price(45.9912, 45.991), 46.0);
        assert_eq!(round_price(45.994, 45.0), 45.99);
        assert_eq!(round_price(45.0, 45.0), 45.0);
    }

    #[test]
    fn margin_analysis_reports_profit_share_of_price() {
        let margin = margin_analysis(45.0, 15.0);
        assert_eq!(margin.profit, 30.0);
        assert!((margin.margin_pct - 66.666_666).abs() < 0.001);

        let degenerate = margin_analysis(0.0, 15.0);
        assert_eq!(degenerate.margin_pct, 0.0);
    }
}
