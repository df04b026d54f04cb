//! Time-to-first-sale and sales projection arithmetic.
//!
//! The simulated advertising lever is the product's core what-if: ads
//! multiply unit sales by [`AD_SALES_MULTIPLIER`] and add a per-unit
//! spend of [`AD_COST_RATE`] of the selling price.

use common::{
    DayRange, LaunchSimulation, MarketStructure, ProjectionTier, ThreeMonthProjection,
    TimeToFirstSale,
};
use tracing::debug;

use crate::types::ProjectionInputs;

/// Baseline days to a first organic sale in an open market.
const BASE_TIME_TO_SALE_DAYS: f64 = 14.0;
const MIN_EXPECTED_DAYS: f64 = 7.0;
const MAX_EXPECTED_DAYS: f64 = 42.0;
/// Each launch-potential point shaves this many days off the wait.
const DAYS_PER_SCORE_POINT: f64 = 3.5;

const WITHOUT_ADS_MIN_RATIO: f64 = 0.7;
const WITHOUT_ADS_MAX_RATIO: f64 = 2.5;
const WITH_ADS_MIN_RATIO: f64 = 0.3;
const WITH_ADS_MAX_RATIO: f64 = 1.2;
const WITH_ADS_EXPECTED_RATIO: f64 = 0.6;

/// Ads multiply expected unit sales by this factor.
pub const AD_SALES_MULTIPLIER: f64 = 1.3;
/// Ads cost this share of the selling price per unit sold.
pub const AD_COST_RATE: f64 = 0.17;

const PROJECTION_WINDOW_DAYS: f64 = 90.0;
const CONSERVATIVE_MULTIPLIER: f64 = 1.0;
const REALISTIC_MULTIPLIER: f64 = 2.0;
const OPTIMISTIC_MULTIPLIER: f64 = 3.5;

fn difficulty_factor(structure: MarketStructure) -> f64 {
    match structure {
        MarketStructure::Dominated => 1.5,
        MarketStructure::Fragmented => 1.2,
        MarketStructure::Open => 1.0,
    }
}

/// Map a 0-10 launch-potential score to expected days until the first
/// organic sale. Lower scores wait longer; the result stays inside
/// 7..=42 days.
pub fn expected_days_from_score(score: f64) -> f64 {
    (MAX_EXPECTED_DAYS - DAYS_PER_SCORE_POINT * score.clamp(0.0, 10.0))
        .clamp(MIN_EXPECTED_DAYS, MAX_EXPECTED_DAYS)
}

fn time_to_first_sale(expected_days: f64) -> TimeToFirstSale {
    TimeToFirstSale {
        without_ads: DayRange {
            min: WITHOUT_ADS_MIN_RATIO * expected_days,
            max: WITHOUT_ADS_MAX_RATIO * expected_days,
            expected: expected_days,
        },
        with_ads: DayRange {
            min: WITH_ADS_MIN_RATIO * expected_days,
            max: WITH_ADS_MAX_RATIO * expected_days,
            expected: WITH_ADS_EXPECTED_RATIO * expected_days,
        },
    }
}

fn tier_units(base_units: f64, multiplier: f64, advertising: bool) -> u32 {
    let ad_multiplier = if advertising { AD_SALES_MULTIPLIER } else { 1.0 };
    (base_units * multiplier * ad_multiplier).round() as u32
}

fn project_tier(units: u32, inputs: &ProjectionInputs) -> ProjectionTier {
    let sales = f64::from(units);
    let revenue = inputs.selling_price * sales;
    let mut unit_cost = inputs.unit_cost;
    if inputs.advertising {
        unit_cost += AD_COST_RATE * inputs.selling_price;
    }
    let profit = revenue - unit_cost * sales;
    let margin_percentage = if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    };
    ProjectionTier {
        estimated_sales: units,
        estimated_revenue: revenue,
        estimated_profit: profit,
        margin_percentage,
    }
}

/// Simulate launch timing and three-month outcomes.
///
/// With a launch-potential score the wait comes from the score mapping;
/// without one it falls back to the market-difficulty baseline.
pub fn simulate_launch(
    potential_score: Option<f64>,
    structure: MarketStructure,
    inputs: &ProjectionInputs,
) -> LaunchSimulation {
    let expected_days = match potential_score {
        Some(score) => expected_days_from_score(score),
        None => BASE_TIME_TO_SALE_DAYS * difficulty_factor(structure),
    };

    let base_units = (PROJECTION_WINDOW_DAYS / expected_days).round().max(1.0);
    let three_month = ThreeMonthProjection {
        conservative: project_tier(
            tier_units(base_units, CONSERVATIVE_MULTIPLIER, inputs.advertising),
            inputs,
        ),
        realistic: project_tier(
            tier_units(base_units, REALISTIC_MULTIPLIER, inputs.advertising),
            inputs,
        ),
        optimistic: project_tier(
            tier_units(base_units, OPTIMISTIC_MULTIPLIER, inputs.advertising),
            inputs,
        ),
    };

    debug!(
        expected_days,
        advertising = inputs.advertising,
        "simulated launch window"
    );

    LaunchSimulation {
        time_to_first_sale: time_to_first_sale(expected_days),
        three_month,
        advertising_enabled: inputs.advertising,
    }
}
