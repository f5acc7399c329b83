//! Compose and render the newsletter digest.
//!
//! Usage:
//!   polynews_digest compose --items data/items.json --groups data/groups.json
//!   polynews_digest render --items data/items.json --groups data/groups.json --date 2024-09-10

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use polynews::config::Config;
use polynews::digest::{
    compose_with_title, format_digest_date, load_groups, load_items, render_newsletter,
    write_digest_html, RenderBlock,
};
use polynews::digest::render::load_template;

#[derive(Parser)]
#[command(name = "polynews_digest")]
#[command(about = "Group, dedup and render the newsletter digest")]
struct Cli {
    #[arg(long, default_value = "config/polynews.toml", global = true)]
    config: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rendering plan as JSON
    Compose {
        #[arg(long)]
        items: PathBuf,
        #[arg(long)]
        groups: Option<PathBuf>,
    },
    /// Write the digest HTML
    Render {
        #[arg(long)]
        items: PathBuf,
        #[arg(long)]
        groups: Option<PathBuf>,
        /// Digest date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        template: Option<String>,
        #[arg(long)]
        data_dir: Option<String>,
    },
}

fn load_config(path: &str) -> Result<Config> {
    if Path::new(path).exists() {
        Config::load(path)
    } else {
        tracing::warn!("Config {} not found, using defaults", path);
        Ok(Config::default())
    }
}

fn build_plan(config: &Config, items: &Path, groups: Option<&Path>) -> Result<Vec<RenderBlock>> {
    let items = load_items(items)?;
    let groups = match groups {
        Some(path) => load_groups(path)?,
        None => Default::default(),
    };
    tracing::info!("Composing digest from {} items and {} groups", items.len(), groups.len());

    let plan = compose_with_title(&items, &groups, &config.digest.other_stories_title);
    let cards = plan.iter().filter(|b| b.item_id().is_some()).count();
    tracing::info!("Rendering plan has {} blocks ({} cards)", plan.len(), cards);
    Ok(plan)
}

fn parse_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(d) => NaiveDate::parse_from_str(&d, "%Y-%m-%d")
            .with_context(|| format!("Invalid --date {:?}, expected YYYY-MM-DD", d)),
        None => Ok(Utc::now().date_naive()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Compose { items, groups } => {
            let plan = build_plan(&config, &items, groups.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Render {
            items,
            groups,
            date,
            template,
            data_dir,
        } => {
            let plan = build_plan(&config, &items, groups.as_deref())?;
            let date = parse_date(date)?;
            let template_path = template.or_else(|| config.digest.template_path.clone());
            let template = load_template(template_path.as_deref())?;

            let html = render_newsletter(&template, &format_digest_date(date), &plan);
            let data_dir = data_dir.unwrap_or_else(|| config.data_dir.clone());
            let path = write_digest_html(&data_dir, &date.format("%Y-%m-%d").to_string(), &html)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}
