//! Sweep recent Polymarket events, score them and export the most interesting.
//!
//! Usage:
//!   polynews_markets --config config/polynews.toml
//!   polynews_markets --days 7 --top 30
//!   polynews_markets --mock --days 3
//!   polynews_markets --input data/markets/date=2024-09-10/markets.json --top 10

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use polynews::config::Config;
use polynews::markets::{load_markets_json, top_markets, write_markets_json, MarketCollector};
use polynews::venue::{EventSource, GammaClient, MockEventSource};

#[derive(Parser)]
#[command(name = "polynews_markets")]
#[command(about = "Collect, score and rank prediction markets")]
struct Cli {
    #[arg(long, default_value = "config/polynews.toml")]
    config: String,
    /// Days to sweep backward from now
    #[arg(long, allow_negative_numbers = true)]
    days: Option<i64>,
    /// Events requested per day window
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    offset: Option<u32>,
    /// Number of top markets to keep
    #[arg(long)]
    top: Option<usize>,
    #[arg(long)]
    data_dir: Option<String>,
    /// Use the synthetic event source instead of the live API
    #[arg(long)]
    mock: bool,
    /// Re-rank a previous export instead of sweeping
    #[arg(long, conflicts_with = "mock")]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = if std::path::Path::new(&cli.config).exists() {
        Config::load(&cli.config)?
    } else {
        tracing::warn!("Config {} not found, using defaults", cli.config);
        Config::default()
    };

    let days = cli.days.unwrap_or(config.collector.days_in_past);
    let limit = cli.limit.unwrap_or(config.collector.page_limit);
    let offset = cli.offset.unwrap_or(config.collector.initial_offset);
    let top_n = cli.top.unwrap_or(config.collector.top_n);
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data_dir.clone());

    let markets = match &cli.input {
        Some(path) => {
            tracing::info!("Re-ranking export {:?}", path);
            load_markets_json(path)?
        }
        None => {
            let source: Arc<dyn EventSource> = if cli.mock {
                Arc::new(MockEventSource::new("mock".to_string(), 5))
            } else {
                Arc::new(GammaClient::new(
                    &config.api.rest_url,
                    Duration::from_secs(config.api.timeout_secs),
                )?)
            };

            tracing::info!(
                "Sweeping {} days from {} (limit={}, offset={})",
                days,
                source.name(),
                limit,
                offset
            );

            MarketCollector::new(source).collect(days, limit, offset).await?
        }
    };
    let total = markets.len();

    let top = top_markets(markets, top_n);
    if top.is_empty() {
        tracing::warn!("No markets retrieved");
        return Ok(());
    }

    for (rank, market) in top.iter().enumerate().take(5) {
        tracing::info!(
            "#{} {} (score {:.2})",
            rank + 1,
            market.title_text(),
            market.interest_score
        );
    }

    let date = Utc::now().format("%Y-%m-%d").to_string();
    let path = write_markets_json(&data_dir, &date, &top)?;
    tracing::info!("Kept {} of {} markets, written to {:?}", top.len(), total, path);

    Ok(())
}
