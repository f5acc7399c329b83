//! Flatten one raw event into a scored [`NormalizedMarket`].

use crate::markets::field::{safe_float, FieldValue, NOT_AVAILABLE};
use crate::markets::raw::{RawEvent, RawMarket, RawTag};
use crate::markets::scoring::interest_score;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;

/// First-outcome projection of one sub-market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOption {
    pub name: String,
    /// Percentage, `outcomePrices[0] * 100`.
    #[serde(deserialize_with = "nullable_f64")]
    pub probability: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub last_trade_price: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub one_day_price_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: FieldValue,
    pub label: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMarket {
    #[serde(deserialize_with = "nullable_f64")]
    pub interest_score: f64,
    pub title: FieldValue,
    pub ticker: FieldValue,
    pub description: FieldValue,
    pub end_date: FieldValue,
    #[serde(deserialize_with = "nullable_f64")]
    pub volume: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub volume24hr: f64,
    #[serde(deserialize_with = "nullable_f64")]
    pub comment_count: f64,
    pub featured: bool,
    /// Sorted by probability, highest first.
    pub options: Vec<MarketOption>,
    pub tags: Vec<Tag>,
}

/// serde_json writes non-finite floats as `null`; read them back as NaN.
fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl NormalizedMarket {
    pub fn title_text(&self) -> String {
        self.title.to_string()
    }
}

/// Normalize and score one event.
pub fn normalize_event(event: &RawEvent) -> NormalizedMarket {
    let mut options: Vec<MarketOption> = event.markets.iter().map(build_option).collect();
    sort_options(&mut options);

    let mut market = NormalizedMarket {
        interest_score: 0.0,
        title: event.title.clone().or_not_available(),
        ticker: event.ticker.clone().or_not_available(),
        description: event.description.clone().or_not_available(),
        end_date: event.end_date.clone().or_not_available(),
        volume: safe_float(&event.volume, 0.0),
        volume24hr: safe_float(&event.volume24hr, 0.0),
        comment_count: safe_float(&event.comment_count, 0.0),
        featured: is_featured(&event.featured),
        options,
        tags: collect_tags(&event.tags),
    };
    market.interest_score = interest_score(&market);
    market
}

/// The "N/A" placeholder is not a flag.
fn is_featured(value: &FieldValue) -> bool {
    match value {
        FieldValue::Text(s) if s == NOT_AVAILABLE => false,
        other => other.is_truthy(),
    }
}

/// One option from outcome/price index 0.
pub fn build_option(market: &RawMarket) -> MarketOption {
    let outcome = market.first_outcome();
    let name = if market.group_item_title.is_truthy() {
        format!("{} ({} is outcome)", market.group_item_title, outcome)
    } else {
        outcome.to_string()
    };

    MarketOption {
        name,
        probability: safe_float(market.first_price(), 0.0) * 100.0,
        last_trade_price: safe_float(&market.last_trade_price, 0.0),
        one_day_price_change: safe_float(&market.one_day_price_change, 0.0),
    }
}

/// Stable descending sort by probability; NaN sorts after every number.
pub fn sort_options(options: &mut [MarketOption]) {
    options.sort_by(|a, b| compare_probability_desc(a.probability, b.probability));
}

fn compare_probability_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Mean absolute one-day price change; 0 with no options.
pub fn avg_price_change(options: &[MarketOption]) -> f64 {
    if options.is_empty() {
        return 0.0;
    }
    let total: f64 = options.iter().map(|o| o.one_day_price_change.abs()).sum();
    total / options.len() as f64
}

fn collect_tags(raw: &[RawTag]) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = Tag {
            id: tag.id.clone().or_not_available(),
            label: tag.label.clone().or_not_available(),
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
