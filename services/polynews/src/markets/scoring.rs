//! Interest heuristic used to rank normalized markets.
//!
//! `base = avg|Δ1d| * vol24h + comments * 100 * (vol24h / volume)` when
//! volume is positive, doubled for featured events and boosted for the
//! breaking-news tag. Markets that already look settled score zero.

use crate::markets::normalize::{avg_price_change, MarketOption, NormalizedMarket, Tag};

/// Gamma tag id for breaking/major news.
pub const BREAKING_TAG_ID: f64 = 198.0;
pub const BREAKING_TAG_BOOST: f64 = 100.0;
pub const FEATURED_MULTIPLIER: f64 = 2.0;
pub const COMMENT_WEIGHT: f64 = 100.0;
/// Distance from 0% / 100% at which an option counts as certain.
pub const CERTAINTY_TOLERANCE: f64 = 0.001;

pub fn interest_score(market: &NormalizedMarket) -> f64 {
    let base = base_score(
        avg_price_change(&market.options),
        market.volume,
        market.volume24hr,
        market.comment_count,
    );

    let mut score = if market.featured {
        base * FEATURED_MULTIPLIER
    } else {
        base
    };

    if has_breaking_tag(&market.tags) {
        score *= BREAKING_TAG_BOOST;
    }

    // Must run last: a settled market scores zero regardless of boosts.
    if is_settled(&market.options) {
        score = 0.0;
    }

    score
}

pub fn base_score(avg_price_change: f64, volume: f64, volume24hr: f64, comment_count: f64) -> f64 {
    if volume > 0.0 {
        avg_price_change * volume24hr + comment_count * COMMENT_WEIGHT * (volume24hr / volume)
    } else {
        0.0
    }
}

pub fn has_breaking_tag(tags: &[Tag]) -> bool {
    tags.iter().any(|t| t.id.as_f64() == Some(BREAKING_TAG_ID))
}

/// Some option at ~100%, or every option at ~0%. Empty slices are never settled.
pub fn is_settled(options: &[MarketOption]) -> bool {
    if options.is_empty() {
        return false;
    }
    let has_certain = options
        .iter()
        .any(|o| (o.probability - 100.0).abs() < CERTAINTY_TOLERANCE);
    let all_dead = options
        .iter()
        .all(|o| o.probability.abs() < CERTAINTY_TOLERANCE);
    has_certain || all_dead
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::field::FieldValue;

    fn option(probability: f64, change: f64) -> MarketOption {
        MarketOption {
            name: "Yes".to_string(),
            probability,
            last_trade_price: probability / 100.0,
            one_day_price_change: change,
        }
    }

    fn market(volume: f64, volume24hr: f64, comments: f64, options: Vec<MarketOption>) -> NormalizedMarket {
        NormalizedMarket {
            interest_score: 0.0,
            title: FieldValue::Text("t".to_string()),
            ticker: FieldValue::Text("t".to_string()),
            description: FieldValue::not_available(),
            end_date: FieldValue::not_available(),
            volume,
            volume24hr,
            comment_count: comments,
            featured: false,
            options,
            tags: vec![],
        }
    }

    fn tag(id: f64) -> Tag {
        Tag {
            id: FieldValue::Number(id),
            label: FieldValue::Text("x".to_string()),
        }
    }

    #[test]
    fn test_base_formula() {
        // avg |Δ| = (0.1 + 0.3) / 2 = 0.2
        let m = market(1000.0, 500.0, 3.0, vec![option(40.0, -0.1), option(30.0, 0.3)]);
        let expected = 0.2 * 500.0 + 3.0 * 100.0 * (500.0 / 1000.0);
        assert!((interest_score(&m) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_zero_volume_scores_zero() {
        let m = market(0.0, 500.0, 50.0, vec![option(40.0, 0.5)]);
        assert_eq!(interest_score(&m), 0.0);
    }

    #[test]
    fn test_featured_doubles_then_tag_boost() {
        let mut m = market(1000.0, 100.0, 0.0, vec![option(50.0, 0.1)]);
        let base = interest_score(&m);
        m.featured = true;
        assert!((interest_score(&m) - base * 2.0).abs() < 1e-9);
        m.tags = vec![tag(2.0), tag(198.0)];
        assert!((interest_score(&m) - base * 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_breaking_tag_matches_text_id() {
        let tags = vec![Tag {
            id: FieldValue::Text("198".to_string()),
            label: FieldValue::Text("Breaking".to_string()),
        }];
        assert!(has_breaking_tag(&tags));
        assert!(!has_breaking_tag(&[tag(19.8)]));
    }

    #[test]
    fn test_certain_market_zeroed_after_boosts() {
        let mut m = market(1000.0, 900.0, 20.0, vec![option(99.9995, 0.2), option(10.0, 0.1)]);
        m.featured = true;
        m.tags = vec![tag(198.0)];
        assert_eq!(interest_score(&m), 0.0);
    }

    #[test]
    fn test_all_zero_market_zeroed() {
        let m = market(1000.0, 900.0, 20.0, vec![option(0.0004, 0.2), option(0.0, 0.1)]);
        assert_eq!(interest_score(&m), 0.0);
    }

    #[test]
    fn test_near_but_outside_tolerance_kept() {
        let m = market(1000.0, 900.0, 20.0, vec![option(99.99, 0.2), option(0.0, 0.1)]);
        assert!(interest_score(&m) > 0.0);
        assert!(!is_settled(&[]));
    }
}
