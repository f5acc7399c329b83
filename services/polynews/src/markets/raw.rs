//! Boundary shapes for gamma `/events` payloads.
//!
//! Decoding never fails: each event is read key by key through
//! [`FieldValue`], and list fields that are absent or malformed collapse to
//! empty (tags, markets) or to `[0]` (outcomes, prices).

use crate::markets::field::{extract, FieldValue};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawEvent {
    pub title: FieldValue,
    pub ticker: FieldValue,
    pub description: FieldValue,
    pub end_date: FieldValue,
    pub volume: FieldValue,
    pub volume24hr: FieldValue,
    pub comment_count: FieldValue,
    pub featured: FieldValue,
    pub tags: Vec<RawTag>,
    pub markets: Vec<RawMarket>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTag {
    pub id: FieldValue,
    pub label: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawMarket {
    pub group_item_title: FieldValue,
    /// Always at least one element.
    pub outcomes: Vec<FieldValue>,
    /// Always at least one element; parallel to `outcomes`.
    pub outcome_prices: Vec<FieldValue>,
    pub last_trade_price: FieldValue,
    pub one_day_price_change: FieldValue,
}

impl From<Value> for RawEvent {
    fn from(value: Value) -> Self {
        RawEvent::from(&value)
    }
}

impl From<&Value> for RawEvent {
    fn from(value: &Value) -> Self {
        let empty = Map::new();
        let event = value.as_object().unwrap_or(&empty);

        RawEvent {
            title: extract(event, "title"),
            ticker: extract(event, "ticker"),
            description: extract(event, "description"),
            end_date: extract(event, "endDate"),
            volume: extract(event, "volume"),
            volume24hr: extract(event, "volume24hr"),
            comment_count: extract(event, "commentCount"),
            featured: extract(event, "featured"),
            tags: objects(event.get("tags")).map(RawTag::from_object).collect(),
            markets: objects(event.get("markets"))
                .map(RawMarket::from_object)
                .collect(),
        }
    }
}

impl RawTag {
    fn from_object(tag: &Map<String, Value>) -> Self {
        Self {
            id: extract(tag, "id"),
            label: extract(tag, "label"),
        }
    }
}

impl RawMarket {
    fn from_object(market: &Map<String, Value>) -> Self {
        Self {
            group_item_title: extract(market, "groupItemTitle"),
            outcomes: decode_literal_list(market.get("outcomes")),
            outcome_prices: decode_literal_list(market.get("outcomePrices")),
            last_trade_price: extract(market, "lastTradePrice"),
            one_day_price_change: extract(market, "oneDayPriceChange"),
        }
    }

    /// First outcome label. Index 0 always exists after decoding.
    pub fn first_outcome(&self) -> &FieldValue {
        &self.outcomes[0]
    }

    pub fn first_price(&self) -> &FieldValue {
        &self.outcome_prices[0]
    }
}

/// Object elements of an optional JSON array; anything else yields nothing.
fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Decode a list that the API ships as text, e.g. `"[\"Yes\", \"No\"]"`.
///
/// Accepts JSON text, Python-style single-quoted lists and real arrays.
/// Missing, malformed or empty input becomes `[0]`.
pub fn decode_literal_list(raw: Option<&Value>) -> Vec<FieldValue> {
    let items = match raw {
        Some(Value::Array(items)) => Some(items.clone()),
        Some(Value::String(text)) => parse_list_text(text),
        _ => None,
    };

    match items {
        Some(items) if !items.is_empty() => items.iter().map(FieldValue::literal).collect(),
        _ => vec![FieldValue::Number(0.0)],
    }
}

fn parse_list_text(text: &str) -> Option<Vec<Value>> {
    serde_json::from_str::<Vec<Value>>(text)
        .ok()
        .or_else(|| serde_json::from_str::<Vec<Value>>(&text.replace('\'', "\"")).ok())
}

/// JSON text form of a list, as the API encodes `outcomes`/`outcomePrices`.
pub fn encode_literal_list(items: &[FieldValue]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
