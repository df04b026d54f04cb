//! Product-category detection and niche competition defaults.
//!
//! The verdict's confidence overrides key off a closed category set rather
//! than ad-hoc substring checks scattered through the scoring code, so the
//! detection rules can be tested on their own.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Closed category set used by the confidence overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Jewelry,
    Bag,
    Baby,
    Other,
}

const JEWELRY_KEYWORDS: &[&str] = &[
    "jewelry",
    "jewellery",
    "necklace",
    "ring",
    "bracelet",
    "earring",
    "pendant",
    "charm",
    "gemstone",
];

const BAG_KEYWORDS: &[&str] = &[
    "bag", "purse", "tote", "handbag", "backpack", "clutch", "pouch", "satchel",
];

const BABY_KEYWORDS: &[&str] = &["baby", "newborn", "infant", "nursery", "toddler", "crib"];

/// Niches that default to a high competition estimate when no observed
/// count is available.
const HIGH_COMPETITION_KEYWORDS: &[&str] = &[
    "jewelry",
    "jewellery",
    "wedding",
    "bridal",
    "necklace",
    "ring",
    "bracelet",
    "earring",
];

/// Detect the product category from the niche tag and the AI visual
/// description. Checked in priority order jewelry > bag > baby; the first
/// hit wins. Substring matching mirrors how sellers type their niches
/// ("boho jewelry", "baby shower").
pub fn detect_category(niche: &str, visual_description: &str) -> ProductCategory {
    let haystack = format!("{} {}", niche, visual_description).to_lowercase();
    if contains_any(&haystack, JEWELRY_KEYWORDS) {
        ProductCategory::Jewelry
    } else if contains_any(&haystack, BAG_KEYWORDS) {
        ProductCategory::Bag
    } else if contains_any(&haystack, BABY_KEYWORDS) {
        ProductCategory::Baby
    } else {
        ProductCategory::Other
    }
}

/// Default competitor count for a niche when neither the AI nor any market
/// lookup produced one. Jewelry/wedding-adjacent niches default high, the
/// rest moderate.
pub fn default_competitors(niche: &str, rng: &mut impl Rng) -> u32 {
    let lowered = niche.to_lowercase();
    if contains_any(&lowered, HIGH_COMPETITION_KEYWORDS) {
        rng.gen_range(100..=160)
    } else {
        rng.gen_range(35..=85)
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|kw| haystack.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn jewelry_detected_from_niche() {
        assert_eq!(detect_category("boho jewelry", ""), ProductCategory::Jewelry);
        assert_eq!(detect_category("Jewelry", ""), ProductCategory::Jewelry);
    }

    #[test]
    fn jewelry_detected_from_description() {
        assert_eq!(
            detect_category("gifts", "a silver pendant on a chain"),
            ProductCategory::Jewelry
        );
    }

    #[test]
    fn jewelry_wins_over_bag() {
        // "necklace pouch" mentions both; jewelry has priority.
        assert_eq!(
            detect_category("necklace pouch", ""),
            ProductCategory::Jewelry
        );
    }

    #[test]
    fn bag_wins_over_baby() {
        assert_eq!(detect_category("baby tote bag", ""), ProductCategory::Bag);
    }

    #[test]
    fn baby_detected() {
        assert_eq!(detect_category("newborn gifts", ""), ProductCategory::Baby);
        assert_eq!(
            detect_category("decor", "a knit blanket for an infant"),
            ProductCategory::Baby
        );
    }

    #[test]
    fn unrelated_niche_is_other() {
        assert_eq!(detect_category("wall art", "abstract print"), ProductCategory::Other);
    }

    #[test]
    fn jewelry_niches_default_to_high_competition() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let count = default_competitors("wedding jewelry", &mut rng);
            assert!((100..=160).contains(&count), "got {count}");
        }
    }

    #[test]
    fn generic_niches_default_to_moderate_competition() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let count = default_competitors("ceramic mugs", &mut rng);
            assert!((35..=85).contains(&count), "got {count}");
        }
    }

    #[test]
    fn same_seed_gives_same_defaults() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(
            default_competitors("candles", &mut a),
            default_competitors("candles", &mut b)
        );
    }
}
