use crate::markets::normalize::NormalizedMarket;
use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Stable sort by interest score, highest first. NaN scores sink to the end.
pub fn rank_by_interest(mut markets: Vec<NormalizedMarket>) -> Vec<NormalizedMarket> {
    markets.sort_by(|a, b| compare_score_desc(a.interest_score, b.interest_score));
    markets
}

pub fn top_markets(markets: Vec<NormalizedMarket>, n: usize) -> Vec<NormalizedMarket> {
    let mut ranked = rank_by_interest(markets);
    ranked.truncate(n);
    ranked
}

pub(crate) fn compare_score_desc(a: f64, b: f64) -> Ordering {
    let key = |s: f64| if s.is_nan() { f64::NEG_INFINITY } else { s };
    key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal)
}

pub fn markets_path(data_dir: &str, date: &str) -> PathBuf {
    Path::new(data_dir)
        .join("markets")
        .join(format!("date={}", date))
        .join("markets.json")
}

/// Write markets as pretty JSON under `{data_dir}/markets/date=.../markets.json`.
pub fn write_markets_json(data_dir: &str, date: &str, markets: &[NormalizedMarket]) -> Result<PathBuf> {
    let path = markets_path(data_dir, date);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(markets).context("Failed to serialize markets")?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;

    tracing::info!("Wrote {} markets to {:?}", markets.len(), path);
    Ok(path)
}

pub fn load_markets_json(path: &Path) -> Result<Vec<NormalizedMarket>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read markets file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse markets file: {:?}", path))
}
