//! Aggregate entity policy
//!
//! The dataset mixes countries with grouping rows ("World", income brackets,
//! "European Union", ...). Every country-level view filters them with the same
//! rule so aggregates never leak into rankings or region membership.

/// Name fragments marking an entity as an aggregate. Matching is case-sensitive.
pub const AGGREGATE_MARKERS: [&str; 4] = ["World", "Income", "Union", "Region"];

/// Whether `name` denotes an aggregate rather than a single country
pub fn is_aggregate(name: &str) -> bool {
    AGGREGATE_MARKERS.iter().any(|marker| name.contains(marker))
}
