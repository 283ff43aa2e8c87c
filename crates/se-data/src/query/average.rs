//! Yearly and regional averages

use std::collections::BTreeMap;
use ahash::AHashMap;
use indexmap::IndexMap;
use tracing::debug;

use se_core::{Region, RegionMapping, Table};

/// Mean of `metric_key` per year over every record with a numeric value.
///
/// Aggregate rows are included; callers that want countries only must filter
/// the table first. Years without a single value are left out.
pub fn global_average_by_year(table: &Table, metric_key: &str) -> BTreeMap<i32, f64> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for record in table {
        if let Some(value) = record.metric(metric_key) {
            let entry = sums.entry(record.year).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(year, (sum, count))| (year, sum / count as f64))
        .collect()
}

/// Mean of `metric_key` in `year` over each region's members.
///
/// Every region of the mapping is present in the result, in mapping order. A
/// region without any member value maps to `0.0`.
pub fn regional_averages_by_year(
    table: &Table,
    metric_key: &str,
    year: i32,
    regions: &RegionMapping,
) -> IndexMap<Region, f64> {
    let mut values: AHashMap<&str, f64> = AHashMap::new();
    for record in table.for_year(year) {
        if let Some(value) = record.metric(metric_key) {
            values.insert(record.entity.as_str(), value);
        }
    }

    let averages: IndexMap<Region, f64> = regions
        .iter()
        .map(|(region, members)| {
            let member_values: Vec<f64> = members
                .iter()
                .filter_map(|entity| values.get(entity.as_str()).copied())
                .collect();

            let average = if member_values.is_empty() {
                0.0
            } else {
                member_values.iter().sum::<f64>() / member_values.len() as f64
            };
            (region, average)
        })
        .collect();

    debug!("Computed {} regional averages of {} for {}", averages.len(), metric_key, year);
    averages
}
