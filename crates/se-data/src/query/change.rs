//! Change of a metric between two years

use ahash::AHashMap;
use indexmap::IndexMap;

use se_core::{MetricChange, Table};

/// Change of `metric_key` from `start_year` to `end_year` for each listed entity.
///
/// Entities without a numeric value in both years are left out, so an empty
/// map means nothing could be compared. The result follows `entities` order.
pub fn metric_change_by_country<S: AsRef<str>>(
    table: &Table,
    metric_key: &str,
    start_year: i32,
    end_year: i32,
    entities: &[S],
) -> IndexMap<String, MetricChange> {
    let start_values = values_in(table, metric_key, start_year);
    let end_values = values_in(table, metric_key, end_year);

    entities
        .iter()
        .filter_map(|entity| {
            let entity: &str = entity.as_ref();
            let start = start_values.get(entity)?;
            let end = end_values.get(entity)?;
            Some((entity.to_string(), MetricChange::between(*start, *end)))
        })
        .collect()
}

fn values_in<'a>(table: &'a Table, metric_key: &str, year: i32) -> AHashMap<&'a str, f64> {
    table
        .for_year(year)
        .filter_map(|r| r.metric(metric_key).map(|v| (r.entity.as_str(), v)))
        .collect()
}
