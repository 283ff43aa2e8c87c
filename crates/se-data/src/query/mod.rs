//! Query engine
//!
//! Pure functions over a loaded [`Table`](se_core::Table). None of them mutate
//! the table and every call builds its result from scratch, so the same inputs
//! always give the same output.

pub mod average;
pub mod change;
pub mod forecast;
pub mod rank;
pub mod region;
pub mod series;

pub use average::{global_average_by_year, regional_averages_by_year};
pub use change::metric_change_by_country;
pub use forecast::{LinearTrend, forecast};
pub use rank::{all_entities, entities, top_by_metric, years};
pub use region::{classify_by_region, classify_coordinates};
pub use series::{entity_records, latest_record, metric_series};

#[cfg(test)]
pub(crate) mod fixtures {
    use se_core::{Record, Table};

    /// Small table mixing countries, an aggregate and gaps
    pub fn sample_table() -> Table {
        Table::new(vec![
            Record::new("Norway", 2000).with_metric("renew", 58.0).with_metric("co2", 40000.0),
            Record::new("Chad", 2000).with_metric("renew", 90.0).with_metric("co2", 200.0),
            Record::new("World", 2000).with_metric("renew", 17.0).with_metric("co2", 25_000_000.0),
            Record::new("Norway", 2019).with_metric("renew", 60.0).with_metric("co2", 41000.0),
            Record::new("Chad", 2019).with_metric("renew", None::<f64>).with_metric("co2", 300.0),
            Record::new("Japan", 2019).with_metric("renew", 8.0).with_metric("co2", 1_100_000.0),
            Record::new("High Income", 2019).with_metric("renew", 12.0),
            Record::new("World", 2019).with_metric("renew", 18.0),
        ])
    }
}
