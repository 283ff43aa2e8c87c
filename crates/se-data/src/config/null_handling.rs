//! Missing-value handling for raw dataset cells

use serde::{Serialize, Deserialize};
use se_core::MetricValue;

/// Which raw strings count as "no value"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Patterns to treat as missing
    pub patterns: Vec<String>,
    
    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,
    
    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: ["", "-", "N/A", "NA", "null", "None", "NaN"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Check if a raw string should be treated as missing
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };
        
        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }
    
    /// Classify a raw string cell: missing, numeric or free text
    pub fn parse_cell(&self, raw: &str) -> MetricValue {
        if self.is_null(raw) {
            return MetricValue::Missing;
        }
        
        match raw.trim().parse::<f64>() {
            Ok(v) if !v.is_nan() => MetricValue::Number(v),
            _ => MetricValue::Text(raw.to_string()),
        }
    }
}
