//! Command-line front end for the sustainable-energy dashboard

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use se_core::{DashboardState, Selection};
use se_data::{DashboardConfig, DatasetCache};

mod commands;
mod terminal;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "energy-dash")]
#[command(about = "Explore per-country sustainable-energy indicators")]
#[command(version)]
struct Cli {
    /// Dataset file (JSON array of rows or CSV); overrides the configuration
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Dashboard configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path).with_context(|| format!("reading configuration {:?}", path))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    let state = DashboardState::new(Selection {
        metric: config.metrics.first().map(|m| m.id.clone()).unwrap_or_default(),
        year: config.years.current,
        baseline_year: config.years.baseline,
        ..Selection::default()
    });

    let cache = DatasetCache::new(config.source()?);
    let table = cache
        .load()
        .await
        .with_context(|| format!("loading dataset {}", cache.source_name()))?;

    commands::run(cli.command, &config, table, &state)
}
