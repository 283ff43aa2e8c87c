//! Subcommands and their output

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::{anyhow, Result};
use clap::{Subcommand, ValueEnum};
use tracing::info;

use se_core::{DashboardState, MetricDef, RankedValue, RankingMode, Table};
use se_data::{query, CountryResolver, DashboardConfig};
use se_views::export::{self, ExportFormat};
use se_views::{
    format_change, format_number, ComparisonView, GlobeCard, GlobeView, PredictionView, SelectionInbox,
    StatisticsView,
};

use crate::terminal::TerminalRenderer;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Distinct years in the dataset
    Years,

    /// Country names, aggregates excluded unless --all
    Entities {
        #[arg(long)]
        all: bool,
    },

    /// Highest values of a metric in a year
    Top(RankArgs),

    /// Lowest values of a metric in a year
    Bottom(RankArgs),

    /// Average of a metric over all rows, per year
    Global {
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Average of a metric per geographic region
    Regions {
        #[arg(short, long)]
        metric: Option<String>,
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Change of a metric between two years for the given countries
    Change {
        #[arg(short, long)]
        metric: Option<String>,
        #[arg(long)]
        from: Option<i32>,
        #[arg(long)]
        to: Option<i32>,
        #[arg(required = true)]
        countries: Vec<String>,
    },

    /// Two countries side by side
    Compare { first: String, second: String },

    /// Card for a country name as it appears on the map
    Globe { name: String },

    /// Linear-trend forecast for one country
    Predict {
        country: String,
        #[arg(short, long)]
        metric: Option<String>,
        /// Years to forecast
        #[arg(long = "year", default_values_t = [2025, 2030])]
        years: Vec<i32>,
    },

    /// Statistics page: ranking, global trend and regions
    Stats(StatsArgs),

    /// Write the statistics data to a file
    Export {
        #[command(flatten)]
        stats: StatsArgs,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        /// Directory the file is written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct RankArgs {
    #[arg(short, long)]
    metric: Option<String>,
    #[arg(short, long)]
    year: Option<i32>,
    #[arg(short, long)]
    limit: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[arg(short, long)]
    metric: Option<String>,
    #[arg(short, long)]
    year: Option<i32>,
    #[arg(long, value_enum, default_value_t = ModeArg::Top)]
    mode: ModeArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Top,
    Bottom,
    Global,
}

impl From<ModeArg> for RankingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Top => RankingMode::Top,
            ModeArg::Bottom => RankingMode::Bottom,
            ModeArg::Global => RankingMode::Global,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

/// Run one subcommand against the loaded table
pub fn run(command: Command, config: &DashboardConfig, shared: Arc<Table>, state: &DashboardState) -> Result<()> {
    let table: &Table = &shared;
    let current = config.years.current;

    match command {
        Command::Years => {
            for year in query::years(table) {
                println!("{}", year);
            }
        }
        Command::Entities { all } => {
            let names = if all { query::all_entities(table) } else { query::entities(table) };
            for name in names {
                println!("{}", name);
            }
        }
        Command::Top(args) => print_ranking(config, table, args, true)?,
        Command::Bottom(args) => print_ranking(config, table, args, false)?,
        Command::Global { metric } => {
            let metric = metric_def(config, metric.as_deref())?;
            for (year, value) in query::global_average_by_year(table, &metric.key) {
                println!("{}  {}", year, format_number(Some(value), metric.format));
            }
        }
        Command::Regions { metric, year } => {
            let metric = metric_def(config, metric.as_deref())?;
            let regions = query::classify_by_region(table);
            let averages = query::regional_averages_by_year(table, &metric.key, year.unwrap_or(current), &regions);
            for (region, value) in averages {
                println!("{:<14} {}", region, format_number(Some(value), metric.format));
            }
        }
        Command::Change { metric, from, to, countries } => {
            let metric = metric_def(config, metric.as_deref())?;
            let changes = query::metric_change_by_country(
                table,
                &metric.key,
                from.unwrap_or(config.years.baseline),
                to.unwrap_or(current),
                &countries,
            );
            if changes.is_empty() {
                println!("No country has values in both years");
            }
            for (entity, change) in changes {
                println!(
                    "{}: {} -> {} ({})",
                    entity,
                    format_number(Some(change.start_value), metric.format),
                    format_number(Some(change.end_value), metric.format),
                    format_change(Some(change.percentage_change)),
                );
            }
        }
        Command::Compare { first, second } => {
            let mut view = ComparisonView::new(TerminalRenderer::default(), config.years.compare_until);
            if let Some(comparison) = view.show(table, &first, &second)? {
                for summary in &comparison.summaries {
                    println!("{}", serde_json::to_string_pretty(summary)?);
                }
            }
        }
        Command::Globe { name } => {
            let resolver = CountryResolver::new(config.years.globe_preferred, config.years.globe_fallback);
            let picked = GlobeView::new(resolver).follow(&state.event_bus, shared.clone());
            state.pick_country(name.as_str());

            match picked.current() {
                Some(GlobeCard::Stats { entity, year, electricity_access, renewable_share, co2_emissions, .. }) => {
                    println!("{} ({})", entity, year);
                    println!("  Access to electricity:  {}", electricity_access);
                    println!("  Renewable energy share: {}", renewable_share);
                    println!("  CO2 emissions:          {} kt", co2_emissions);
                }
                Some(GlobeCard::NoData { name, message }) => println!("{}: {}", name, message),
                None => println!("No country picked"),
            }
        }
        Command::Predict { country, metric, years } => {
            let metric = metric_def(config, metric.as_deref())?;
            let mut view = PredictionView::new(TerminalRenderer::default());
            let prediction = view.show(table, &country, metric, &years)?;
            for (year, value) in prediction.forecasts {
                println!("{} {}: {}", country, year, format_number(value, metric.format));
            }
        }
        Command::Stats(args) => {
            let inbox = SelectionInbox::subscribe(&state.event_bus);
            let mut metric = select(config, state, &args)?;
            let selection = inbox.take().unwrap_or_else(|| state.selection());
            if let Some(selected) = config.metric(&selection.metric) {
                metric = selected;
            }

            let mut view = StatisticsView::new(
                TerminalRenderer::default(),
                query::classify_by_region(table),
                config.ranking_limit,
            );
            let snapshot = view.refresh(table, metric, &selection)?;
            println!("{}", snapshot.title);
            for row in &snapshot.rows {
                println!("{:>3}. {:<32} {:>12} {:>8}", row.rank, row.label, row.value, row.change);
            }
        }
        Command::Export { stats, format, output } => {
            let metric = select(config, state, &stats)?;
            let selection = state.selection();
            let regions = query::classify_by_region(table);
            let snapshot = StatisticsView::<TerminalRenderer>::snapshot(
                table,
                metric,
                &selection,
                &regions,
                config.ranking_limit,
            );

            let format = ExportFormat::from(format);
            let contents = match format {
                ExportFormat::Csv => snapshot.export.to_csv(&metric.label)?,
                ExportFormat::Json => snapshot.export.to_json()?,
            };
            let path = output.join(export::export_file_name(&metric.label, selection.year, format));
            export::write_export(&path, &contents)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn print_ranking(config: &DashboardConfig, table: &Table, args: RankArgs, descending: bool) -> Result<()> {
    let metric = metric_def(config, args.metric.as_deref())?;
    let year = args.year.unwrap_or(config.years.current);
    let ranked: Vec<RankedValue> =
        query::top_by_metric(table, &metric.key, year, args.limit.unwrap_or(config.ranking_limit), descending);

    info!("{} entries for {} in {}", ranked.len(), metric.id, year);
    for (i, row) in ranked.iter().enumerate() {
        println!("{:>3}. {:<32} {}", i + 1, row.entity, format_number(Some(row.value), metric.format));
    }
    Ok(())
}

/// Apply the statistics arguments to the shared selection
fn select<'a>(config: &'a DashboardConfig, state: &DashboardState, args: &StatsArgs) -> Result<&'a MetricDef> {
    let metric = metric_def(config, args.metric.as_deref())?;
    state.set_metric(metric.id.as_str());
    if let Some(year) = args.year {
        state.set_year(year);
    }
    state.set_mode(args.mode.into());
    Ok(metric)
}

/// Configured metric by id or key, the first one when none is named
fn metric_def<'a>(config: &'a DashboardConfig, wanted: Option<&str>) -> Result<&'a MetricDef> {
    match wanted {
        Some(id) => config.metric(id).ok_or_else(|| anyhow!("unknown metric '{}'", id)),
        None => config.metrics.first().ok_or_else(|| anyhow!("no metrics configured")),
    }
}
