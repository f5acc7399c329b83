use crate::error::{PolynewsError, Result};
use crate::markets::normalize::{normalize_event, NormalizedMarket};
use crate::venue::{EventQuery, EventSource};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One day-long `start_date` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepWindow {
    pub start_date_min: DateTime<Utc>,
    pub start_date_max: DateTime<Utc>,
}

/// Windows walking backward from `now`, newest first, one per day.
pub fn sweep_windows(now: DateTime<Utc>, days_in_past: i64) -> Result<Vec<SweepWindow>> {
    if days_in_past < 0 {
        return Err(PolynewsError::InvalidArgument(format!(
            "days_in_past must not be negative (got {})",
            days_in_past
        )));
    }

    // The oldest window bounds every other one, so checking it covers the whole sweep.
    let oldest = Duration::try_days(days_in_past).and_then(|span| now.checked_sub_signed(span));
    if oldest.is_none() {
        return Err(PolynewsError::InvalidArgument(format!(
            "days_in_past {} reaches past the representable date range from {}",
            days_in_past, now
        )));
    }

    Ok((0..days_in_past)
        .map(|day| {
            let start_date_max = now - Duration::days(day);
            SweepWindow {
                start_date_min: start_date_max - Duration::days(1),
                start_date_max,
            }
        })
        .collect())
}

/// Sweeps day windows against an [`EventSource`], normalizing and scoring
/// everything it receives.
pub struct MarketCollector {
    source: Arc<dyn EventSource>,
}

impl MarketCollector {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    pub async fn collect(
        &self,
        days_in_past: i64,
        page_limit: u32,
        initial_offset: u32,
    ) -> Result<Vec<NormalizedMarket>> {
        self.collect_from(Utc::now(), days_in_past, page_limit, initial_offset)
            .await
    }

    /// Results keep fetch order (newest window first); ranking is left to the caller.
    pub async fn collect_from(
        &self,
        now: DateTime<Utc>,
        days_in_past: i64,
        page_limit: u32,
        initial_offset: u32,
    ) -> Result<Vec<NormalizedMarket>> {
        let windows = sweep_windows(now, days_in_past)?;
        let mut markets = Vec::new();
        let mut failed_windows = 0usize;

        for window in &windows {
            let query = EventQuery {
                limit: page_limit,
                offset: initial_offset,
                active: true,
                start_date_min: window.start_date_min,
                start_date_max: window.start_date_max,
            };

            let events = match self.source.fetch_events(&query).await {
                Ok(events) => events,
                Err(e) => {
                    warn!(
                        "Fetch from {} failed for window ending {}: {}",
                        self.source.name(),
                        window.start_date_max,
                        e
                    );
                    failed_windows += 1;
                    Vec::new()
                }
            };

            debug!(
                "Window {} .. {}: {} events",
                window.start_date_min,
                window.start_date_max,
                events.len()
            );
            markets.extend(events.iter().map(normalize_event));
        }

        info!(
            "Collected {} markets from {} over {} day windows ({} failed)",
            markets.len(),
            self.source.name(),
            windows.len(),
            failed_windows
        );
        Ok(markets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::RawEvent;
    use crate::venue::MockEventSource;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 10, 12, 0, 0).unwrap()
    }

    fn titled(title: &str) -> RawEvent {
        RawEvent::from(json!({"title": title}))
    }

    #[test]
    fn test_sweep_windows() {
        let windows = sweep_windows(now(), 3).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start_date_max, now());
        assert_eq!(windows[0].start_date_min, now() - Duration::days(1));
        assert_eq!(windows[2].start_date_max, now() - Duration::days(2));
        assert_eq!(windows[2].start_date_min, now() - Duration::days(3));
    }

    #[test]
    fn test_sweep_windows_edges() {
        assert!(sweep_windows(now(), 0).unwrap().is_empty());
        assert!(matches!(
            sweep_windows(now(), -1),
            Err(PolynewsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sweep_windows_out_of_range() {
        assert!(matches!(
            sweep_windows(now(), 100_000_000),
            Err(PolynewsError::InvalidArgument(_))
        ));
        assert!(matches!(
            sweep_windows(now(), i64::MAX),
            Err(PolynewsError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_collect_issues_one_query_per_day() {
        let source = Arc::new(MockEventSource::new("mock".to_string(), 2));
        let collector = MarketCollector::new(source.clone());

        let markets = collector.collect_from(now(), 3, 50, 7).await.unwrap();
        assert_eq!(markets.len(), 6);

        let queries = source.queries().await;
        assert_eq!(queries.len(), 3);
        assert!(queries.iter().all(|q| q.limit == 50 && q.offset == 7 && q.active));
        assert_eq!(queries[1].start_date_max, now() - Duration::days(1));
    }

    #[tokio::test]
    async fn test_collect_preserves_fetch_order_and_skips_failures() {
        let source = Arc::new(MockEventSource::scripted(
            "mock".to_string(),
            vec![
                Ok(vec![titled("day0-a"), titled("day0-b")]),
                Err(PolynewsError::Fetch("timeout".to_string())),
                Ok(vec![titled("day2-a")]),
            ],
        ));
        let collector = MarketCollector::new(source.clone());

        let markets = collector.collect_from(now(), 3, 100, 0).await.unwrap();
        let titles: Vec<String> = markets.iter().map(|m| m.title_text()).collect();
        assert_eq!(titles, vec!["day0-a", "day0-b", "day2-a"]);
        assert_eq!(source.queries().await.len(), 3);
    }

    #[tokio::test]
    async fn test_collect_rejects_negative_days() {
        let collector = MarketCollector::new(Arc::new(MockEventSource::new("mock".to_string(), 1)));
        assert!(collector.collect(-2, 10, 0).await.is_err());
    }
}
