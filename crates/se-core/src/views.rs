//! Derived view value objects
//!
//! Everything here is recomputed per query and owned by the caller.

use serde::{Deserialize, Serialize};

/// One entry of a ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedValue {
    #[serde(rename = "country")]
    pub entity: String,
    pub value: f64,
}

impl RankedValue {
    pub fn new(entity: impl Into<String>, value: f64) -> Self {
        Self { entity: entity.into(), value }
    }
}

/// A yearly aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

/// Change of one metric between two years for one entity.
///
/// `percentage_change` is infinite when the start value is zero (NaN when
/// both ends are zero); display code decides how to show that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricChange {
    pub start_value: f64,
    pub end_value: f64,
    pub absolute_change: f64,
    pub percentage_change: f64,
}

impl MetricChange {
    pub fn between(start_value: f64, end_value: f64) -> Self {
        let absolute_change = end_value - start_value;
        Self {
            start_value,
            end_value,
            absolute_change,
            percentage_change: absolute_change / start_value * 100.0,
        }
    }
}

/// Point of a trend line: `x` is the year, `y` the metric value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

impl TrendPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_from_zero_is_infinite() {
        let change = MetricChange::between(0.0, 5.0);
        assert_eq!(change.absolute_change, 5.0);
        assert!(change.percentage_change.is_infinite());
        assert!(change.percentage_change > 0.0);
    }

    #[test]
    fn test_change_percentage() {
        let change = MetricChange::between(40.0, 50.0);
        assert_eq!(change.percentage_change, 25.0);

        let drop = MetricChange::between(50.0, 40.0);
        assert_eq!(drop.absolute_change, -10.0);
        assert_eq!(drop.percentage_change, -20.0);
    }

    #[test]
    fn test_ranked_value_exports_country_field() {
        let json = serde_json::to_value(RankedValue::new("Peru", 3.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "country": "Peru", "value": 3.5 }));
    }
}
