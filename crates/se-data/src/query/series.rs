//! Per-entity series used by the comparison and prediction views

use se_core::{Record, Table, TrendPoint};

/// Yearly values of one metric for one entity, ascending by year.
///
/// Years without a numeric value are skipped.
pub fn metric_series(table: &Table, entity: &str, metric_key: &str) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = table
        .for_entity(entity)
        .filter_map(|r| r.metric(metric_key).map(|v| TrendPoint::new(f64::from(r.year), v)))
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}

/// Records of one entity up to and including `until_year`, ascending by year
pub fn entity_records<'a>(table: &'a Table, entity: &str, until_year: i32) -> Vec<&'a Record> {
    let mut records: Vec<&Record> = table
        .iter()
        .filter(|r| r.entity == entity && r.year <= until_year)
        .collect();
    records.sort_by_key(|r| r.year);
    records
}

/// The record for `year`, else the last one, else nothing
pub fn latest_record<'a>(records: &[&'a Record], year: i32) -> Option<&'a Record> {
    records
        .iter()
        .find(|r| r.year == year)
        .or_else(|| records.last())
        .copied()
}
