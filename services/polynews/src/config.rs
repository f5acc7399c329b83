use crate::error::PolynewsError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub digest: DigestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_rest_url")]
    pub rest_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_days_in_past")]
    pub days_in_past: i64,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default)]
    pub initial_offset: u32,
    /// How many of the best-scoring markets are kept in the export.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub template_path: Option<String>,
    #[serde(default = "default_other_stories_title")]
    pub other_stories_title: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), PolynewsError> {
        if self.collector.page_limit == 0 {
            return Err(PolynewsError::Config(
                "collector.page_limit must be greater than zero".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(PolynewsError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.collector.days_in_past < 0 {
            return Err(PolynewsError::Config(format!(
                "collector.days_in_past must not be negative (got {})",
                self.collector.days_in_past
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api: ApiConfig::default(),
            collector: CollectorConfig::default(),
            digest: DigestConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            days_in_past: default_days_in_past(),
            page_limit: default_page_limit(),
            initial_offset: 0,
            top_n: default_top_n(),
        }
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            other_stories_title: default_other_stories_title(),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_rest_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_days_in_past() -> i64 {
    1
}

fn default_page_limit() -> u32 {
    100
}

fn default_top_n() -> usize {
    20
}

fn default_other_stories_title() -> String {
    "Other Stories".to_string()
}
