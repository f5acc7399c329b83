use super::traits::{EventQuery, EventSource};
use crate::error::{PolynewsError, Result};
use crate::markets::raw::encode_literal_list;
use crate::markets::{FieldValue, RawEvent};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

enum Mode {
    /// Synthesize `events_per_window` events for every request.
    Generated { events_per_window: usize },
    /// Replay queued responses in order, then return empty pages.
    Scripted(Mutex<VecDeque<Result<Vec<RawEvent>>>>),
}

/// In-memory event source. Records every query it receives.
pub struct MockEventSource {
    name: String,
    mode: Mode,
    failing_calls: HashSet<usize>,
    queries: Arc<Mutex<Vec<EventQuery>>>,
}

impl MockEventSource {
    pub fn new(name: String, events_per_window: usize) -> Self {
        Self {
            name,
            mode: Mode::Generated { events_per_window },
            failing_calls: HashSet::new(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn scripted(name: String, responses: Vec<Result<Vec<RawEvent>>>) -> Self {
        Self {
            name,
            mode: Mode::Scripted(Mutex::new(responses.into_iter().collect())),
            failing_calls: HashSet::new(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make the given zero-based calls fail with a fetch error.
    pub fn with_failing_calls(mut self, calls: &[usize]) -> Self {
        self.failing_calls = calls.iter().copied().collect();
        self
    }

    pub async fn queries(&self) -> Vec<EventQuery> {
        self.queries.lock().await.clone()
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>> {
        let call = {
            let mut queries = self.queries.lock().await;
            queries.push(query.clone());
            queries.len() - 1
        };

        let response = match &self.mode {
            Mode::Generated { events_per_window } => Ok((0..*events_per_window)
                .map(|i| RawEvent::from(generate_event(call, i, query)))
                .collect()),
            Mode::Scripted(responses) => responses.lock().await.pop_front().unwrap_or(Ok(vec![])),
        };

        if self.failing_calls.contains(&call) {
            return Err(PolynewsError::Fetch(format!("mock failure on call {}", call)));
        }
        response
    }
}

/// Deterministic synthetic event for window `call`, slot `i`.
fn generate_event(call: usize, i: usize, query: &EventQuery) -> Value {
    let seed = (call * 31 + i * 7) as f64;
    let yes = 0.05 + ((seed * 13.0) % 90.0) / 100.0;
    let outcomes = [
        FieldValue::Text("Yes".to_string()),
        FieldValue::Text("No".to_string()),
    ];
    let prices = [
        FieldValue::Text(format!("{:.3}", yes)),
        FieldValue::Text(format!("{:.3}", 1.0 - yes)),
    ];
    let mut tags = vec![json!({"id": "2", "label": "Politics"})];
    if i % 5 == 4 {
        tags.push(json!({"id": "198", "label": "Breaking News"}));
    }

    let group_title = if i % 2 == 0 {
        String::new()
    } else {
        format!("Bracket {}", i)
    };

    json!({
        "title": format!("Mock Event {}-{}", call, i),
        "ticker": format!("mock-event-{}-{}", call, i),
        "description": format!("Synthetic event for window ending {}", query.start_date_max.to_rfc3339()),
        "endDate": (query.start_date_max + chrono::Duration::days(30)).to_rfc3339(),
        "volume": format!("{:.2}", 10_000.0 + seed * 250.0),
        "volume24hr": 500.0 + seed * 10.0,
        "commentCount": (i * 3) as u64,
        "featured": i % 4 == 0,
        "tags": tags,
        "markets": [{
            "groupItemTitle": group_title,
            "outcomes": encode_literal_list(&outcomes),
            "outcomePrices": encode_literal_list(&prices),
            "lastTradePrice": yes,
            "oneDayPriceChange": ((seed % 7.0) - 3.0) / 100.0
        }]
    })
}
