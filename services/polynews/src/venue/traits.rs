use crate::error::Result;
use crate::markets::RawEvent;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format the events endpoint expects for `start_date_*`.
pub const QUERY_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Query parameters for one `/events` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    pub limit: u32,
    pub offset: u32,
    pub active: bool,
    pub start_date_min: DateTime<Utc>,
    pub start_date_max: DateTime<Utc>,
}

impl EventQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("active", self.active.to_string()),
            (
                "start_date_min",
                self.start_date_min.format(QUERY_DATE_FORMAT).to_string(),
            ),
            (
                "start_date_max",
                self.start_date_max.format(QUERY_DATE_FORMAT).to_string(),
            ),
        ]
    }
}

/// Source of raw events. Errors are reported, never retried, by callers.
#[async_trait]
pub trait EventSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>>;
}
