//! Dataset records

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field name carrying the entity in the raw dataset
pub const ENTITY_FIELD: &str = "Entity";

/// Field name carrying the year in the raw dataset
pub const YEAR_FIELD: &str = "Year";

/// A single metric cell as it appeared in the source
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Missing,
}

impl MetricValue {
    /// Numeric view of the cell.
    ///
    /// Text is parsed leniently (surrounding whitespace ignored). NaN never
    /// comes back out: a cell that is not a number is absent.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            MetricValue::Number(v) => *v,
            MetricValue::Text(s) => s.trim().parse::<f64>().ok()?,
            MetricValue::Missing => return None,
        };

        if value.is_nan() {
            None
        } else {
            Some(value)
        }
    }

    pub fn is_missing(&self) -> bool {
        self.as_f64().is_none()
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map(MetricValue::Number).unwrap_or(MetricValue::Missing)
    }
}

/// One row of the dataset: an entity observed in a given year
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Country or aggregate name
    pub entity: String,

    /// Observation year
    pub year: i32,

    /// Every other column, in source order
    pub metrics: IndexMap<String, MetricValue>,
}

impl Record {
    /// Create a record without any metric columns
    pub fn new(entity: impl Into<String>, year: i32) -> Self {
        Self {
            entity: entity.into(),
            year,
            metrics: IndexMap::new(),
        }
    }

    /// Builder-style helper to attach a metric
    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }

    /// Numeric value of a metric, `None` when absent or non-numeric
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).and_then(MetricValue::as_f64)
    }

    /// Raw cell for a metric
    pub fn raw(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.get(key)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metrics.len() + 2))?;
        map.serialize_entry(ENTITY_FIELD, &self.entity)?;
        map.serialize_entry(YEAR_FIELD, &self.year)?;
        for (key, value) in &self.metrics {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
