//! Side-by-side comparison of two countries

use std::collections::BTreeSet;
use anyhow::Context;
use serde::Serialize;

use se_core::metrics::{CO2_EMISSIONS, ELECTRICITY_ACCESS, GDP_PER_CAPITA, RENEWABLE_SHARE};
use se_core::{Record, Table};
use se_data::query;

use crate::chart::{ChartKind, ChartRenderer, ChartSpec, Dataset};
use crate::format::format_fixed;
use crate::slot::ChartSlot;

const FIRST_COLOR: &str = "#4299e1";
const SECOND_COLOR: &str = "#f56565";

/// Summary card for one country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummary {
    pub name: String,
    /// Year the figures come from, if the country has any record
    pub year: Option<i32>,
    pub renewable_share: String,
    pub electricity_access: String,
    pub co2_emissions: String,
    pub gdp_per_capita: String,
}

impl CountrySummary {
    fn from_record(name: &str, record: Option<&Record>) -> Self {
        let value = |key: &str| record.and_then(|r| r.metric(key));
        Self {
            name: name.to_string(),
            year: record.map(|r| r.year),
            renewable_share: with_unit(format_fixed(value(RENEWABLE_SHARE), 2), "%"),
            electricity_access: with_unit(format_fixed(value(ELECTRICITY_ACCESS), 2), "%"),
            co2_emissions: format_fixed(value(CO2_EMISSIONS), 0),
            gdp_per_capita: with_prefix("$", format_fixed(value(GDP_PER_CAPITA), 0)),
        }
    }
}

/// Result of comparing two countries
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Every year either country has a record for, ascending
    pub years: Vec<i32>,
    pub renewable: ChartSpec,
    pub co2: ChartSpec,
    pub summaries: [CountrySummary; 2],
}

/// Comparison page with its two line charts
pub struct ComparisonView<R: ChartRenderer> {
    renderer: R,
    until_year: i32,
    renewable_chart: ChartSlot<R::Handle>,
    co2_chart: ChartSlot<R::Handle>,
}

impl<R: ChartRenderer> ComparisonView<R> {
    pub fn new(renderer: R, until_year: i32) -> Self {
        Self {
            renderer,
            until_year,
            renewable_chart: ChartSlot::new("renewable"),
            co2_chart: ChartSlot::new("co2"),
        }
    }

    /// Compare and redraw both charts.
    ///
    /// `None` (and no charts) when either name is empty.
    pub fn show(&mut self, table: &Table, first: &str, second: &str) -> anyhow::Result<Option<Comparison>> {
        let comparison = match Self::compare(table, first, second, self.until_year) {
            Some(comparison) => comparison,
            None => {
                self.renewable_chart.clear();
                self.co2_chart.clear();
                return Ok(None);
            }
        };

        let renderer = &mut self.renderer;
        self.renewable_chart
            .replace_with(|| renderer.render(&comparison.renewable))
            .context("drawing renewable share chart")?;
        self.co2_chart
            .replace_with(|| renderer.render(&comparison.co2))
            .context("drawing CO2 chart")?;

        Ok(Some(comparison))
    }

    /// Build the comparison without drawing
    pub fn compare(table: &Table, first: &str, second: &str, until_year: i32) -> Option<Comparison> {
        if first.trim().is_empty() || second.trim().is_empty() {
            return None;
        }

        let first_records = query::entity_records(table, first, until_year);
        let second_records = query::entity_records(table, second, until_year);

        let years: Vec<i32> = first_records
            .iter()
            .chain(second_records.iter())
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let line_chart = |title: &str, key: &str| {
            ChartSpec::new(ChartKind::Line, title)
                .with_labels(years.iter())
                .with_dataset(Dataset::new(first, aligned(&first_records, &years, key), FIRST_COLOR))
                .with_dataset(Dataset::new(second, aligned(&second_records, &years, key), SECOND_COLOR))
        };
        let renewable = line_chart("Renewable energy share (%)", RENEWABLE_SHARE);
        let co2 = line_chart("CO2 emissions (kt)", CO2_EMISSIONS);

        let summaries = [
            CountrySummary::from_record(first, query::latest_record(&first_records, until_year)),
            CountrySummary::from_record(second, query::latest_record(&second_records, until_year)),
        ];

        Some(Comparison {
            years,
            renewable,
            co2,
            summaries,
        })
    }
}

/// Values of `key` for each of `years`, `None` where there is no record or value
fn aligned(records: &[&Record], years: &[i32], key: &str) -> Vec<Option<f64>> {
    years
        .iter()
        .map(|year| {
            records
                .iter()
                .find(|r| r.year == *year)
                .and_then(|r| r.metric(key))
        })
        .collect()
}

fn with_unit(value: String, unit: &str) -> String {
    if value == crate::format::NOT_AVAILABLE {
        value
    } else {
        format!("{}{}", value, unit)
    }
}

fn with_prefix(prefix: &str, value: String) -> String {
    if value == crate::format::NOT_AVAILABLE {
        value
    } else {
        format!("{}{}", prefix, value)
    }
}
