use super::traits::{EventQuery, EventSource};
use crate::error::{PolynewsError, Result};
use crate::markets::RawEvent;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_REST_URL: &str = "https://gamma-api.polymarket.com";

/// HTTP client for the gamma `/events` endpoint.
pub struct GammaClient {
    name: String,
    rest_url: String,
    client: reqwest::Client,
}

impl GammaClient {
    pub fn new(rest_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            name: "polymarket".to_string(),
            rest_url: if rest_url.is_empty() {
                DEFAULT_REST_URL.to_string()
            } else {
                rest_url.trim_end_matches('/').to_string()
            },
            client,
        })
    }

    pub fn events_url(&self, query: &EventQuery) -> Result<url::Url> {
        url::Url::parse_with_params(&format!("{}/events", self.rest_url), query.params())
            .map_err(|e| PolynewsError::Fetch(format!("bad events url: {}", e)))
    }
}

#[async_trait]
impl EventSource for GammaClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_events(&self, query: &EventQuery) -> Result<Vec<RawEvent>> {
        let url = self.events_url(query)?;
        tracing::debug!("Fetching events from Polymarket: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PolynewsError::Fetch(format!(
                "Polymarket API returned error: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PolynewsError::Decode(format!("response is not JSON: {}", e)))?;

        parse_events_body(body)
    }
}

/// Accepts a top-level array or a `{"data": [...]}` envelope. Non-object
/// elements are skipped.
pub fn parse_events_body(body: Value) -> Result<Vec<RawEvent>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::error!("Unexpected Polymarket API response format: object without data array");
                return Err(PolynewsError::Decode(
                    "object response without a data array".to_string(),
                ));
            }
        },
        other => {
            tracing::error!(
                "Unexpected Polymarket API response format: {}",
                serde_json::to_string(&other).unwrap_or_default()
            );
            return Err(PolynewsError::Decode(
                "expected an array of events".to_string(),
            ));
        }
    };

    let total = items.len();
    let events: Vec<RawEvent> = items
        .iter()
        .filter(|item| item.is_object())
        .map(RawEvent::from)
        .collect();

    if events.len() < total {
        tracing::warn!("Skipped {} non-object entries in events response", total - events.len());
    }

    Ok(events)
}
