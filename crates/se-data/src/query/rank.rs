//! Enumerations and rankings

use std::collections::BTreeSet;
use indexmap::IndexMap;
use tracing::debug;

use se_core::{RankedValue, Table, is_aggregate};

/// Distinct years, ascending
pub fn years(table: &Table) -> Vec<i32> {
    table.iter().map(|r| r.year).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct country names, sorted, aggregates excluded
pub fn entities(table: &Table) -> Vec<String> {
    table
        .iter()
        .map(|r| r.entity.as_str())
        .filter(|e| !is_aggregate(e))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Every distinct entity name, sorted, aggregates included
pub fn all_entities(table: &Table) -> Vec<String> {
    table
        .iter()
        .map(|r| r.entity.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Rank countries by `metric_key` in `year`.
///
/// Records without a numeric value and aggregate entities are dropped. When an
/// entity appears more than once in the year its last value wins, but it keeps
/// the position of its first appearance; ties keep that order.
pub fn top_by_metric(
    table: &Table,
    metric_key: &str,
    year: i32,
    limit: usize,
    descending: bool,
) -> Vec<RankedValue> {
    let mut per_entity: IndexMap<&str, f64> = IndexMap::new();
    for record in table.for_year(year) {
        if is_aggregate(&record.entity) {
            continue;
        }
        if let Some(value) = record.metric(metric_key) {
            per_entity.insert(record.entity.as_str(), value);
        }
    }

    let mut ranked: Vec<RankedValue> = per_entity
        .into_iter()
        .map(|(entity, value)| RankedValue::new(entity, value))
        .collect();

    // sort_by is stable
    if descending {
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    } else {
        ranked.sort_by(|a, b| a.value.total_cmp(&b.value));
    }
    ranked.truncate(limit);

    debug!("Ranked {} entities by {} for {}", ranked.len(), metric_key, year);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::fixtures::sample_table;
    use se_core::Record;

    #[test]
    fn test_years_and_entities() {
        let table = sample_table();
        assert_eq!(years(&table), vec![2000, 2019]);
        assert_eq!(entities(&table), vec!["Chad", "Japan", "Norway"]);
        assert_eq!(all_entities(&table), vec!["Chad", "High Income", "Japan", "Norway", "World"]);
    }

    #[test]
    fn test_world_excluded_from_ranking() {
        let table = Table::new(vec![
            Record::new("A", 2019).with_metric("co2", 100.0),
            Record::new("B", 2019).with_metric("co2", 50.0),
            Record::new("World", 2019).with_metric("co2", 9999.0),
        ]);

        let top = top_by_metric(&table, "co2", 2019, 10, true);
        assert_eq!(top, vec![RankedValue::new("A", 100.0), RankedValue::new("B", 50.0)]);
    }

    #[test]
    fn test_ranking_order_and_limit() {
        let table = sample_table();

        let top = top_by_metric(&table, "co2", 2019, 2, true);
        assert_eq!(top, vec![RankedValue::new("Japan", 1_100_000.0), RankedValue::new("Norway", 41000.0)]);

        let bottom = top_by_metric(&table, "co2", 2019, 2, false);
        assert_eq!(bottom, vec![RankedValue::new("Chad", 300.0), RankedValue::new("Norway", 41000.0)]);
    }

    #[test]
    fn test_missing_values_are_dropped() {
        let table = sample_table();
        let top = top_by_metric(&table, "renew", 2019, 10, true);

        let names: Vec<_> = top.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(names, vec!["Norway", "Japan"]);
    }

    #[test]
    fn test_duplicates_last_value_wins_first_position_kept() {
        let table = Table::new(vec![
            Record::new("A", 2010).with_metric("m", 1.0),
            Record::new("B", 2010).with_metric("m", 5.0),
            Record::new("A", 2010).with_metric("m", 5.0),
            Record::new("C", 2010).with_metric("m", 5.0),
        ]);

        let top = top_by_metric(&table, "m", 2010, 10, true);
        let names: Vec<_> = top.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(top[0].value, 5.0);
    }

    #[test]
    fn test_descending_is_reverse_of_ascending_by_value() {
        let table = sample_table();
        let desc: Vec<f64> = top_by_metric(&table, "co2", 2019, 10, true).iter().map(|r| r.value).collect();
        let mut asc: Vec<f64> = top_by_metric(&table, "co2", 2019, 10, false).iter().map(|r| r.value).collect();
        asc.reverse();

        assert_eq!(desc, asc);
        assert!(desc.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_unknown_year_is_empty() {
        assert!(top_by_metric(&sample_table(), "co2", 1990, 10, true).is_empty());
        assert!(top_by_metric(&sample_table(), "co2", 2019, 0, true).is_empty());
    }
}
