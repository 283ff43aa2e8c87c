//! Raw row to `Record` conversion shared by the file sources

use serde_json::{Map, Value};
use tracing::warn;

use se_core::record::{ENTITY_FIELD, YEAR_FIELD};
use se_core::{MetricValue, Record};

use crate::config::NullConfig;

/// Turns raw rows into records, counting the ones that had to be dropped
pub struct RowParser<'a> {
    null_config: &'a NullConfig,
    skipped: usize,
}

impl<'a> RowParser<'a> {
    pub fn new(null_config: &'a NullConfig) -> Self {
        Self { null_config, skipped: 0 }
    }
    
    /// Rows dropped for lacking an entity or a year
    pub fn skipped(&self) -> usize {
        self.skipped
    }
    
    /// Convert one JSON object
    pub fn json_row(&mut self, object: &Map<String, Value>) -> Option<Record> {
        let entity = object.get(ENTITY_FIELD).and_then(Value::as_str);
        let year = object.get(YEAR_FIELD).and_then(json_year);
        
        let (entity, year) = match (entity, year) {
            (Some(entity), Some(year)) if !entity.trim().is_empty() => (entity, year),
            _ => {
                self.skipped += 1;
                return None;
            }
        };
        
        let mut record = Record::new(entity, year);
        for (key, value) in object {
            if key == ENTITY_FIELD || key == YEAR_FIELD {
                continue;
            }
            record.metrics.insert(key.clone(), self.json_cell(value));
        }
        Some(record)
    }
    
    /// Convert one CSV row given the header names
    pub fn csv_row(&mut self, headers: &csv::StringRecord, row: &csv::StringRecord) -> Option<Record> {
        let mut entity = None;
        let mut year = None;
        let mut record = Record::new(String::new(), 0);
        
        for (key, raw) in headers.iter().zip(row.iter()) {
            match key {
                ENTITY_FIELD => entity = Some(raw).filter(|e| !e.trim().is_empty()),
                YEAR_FIELD => year = parse_leading_int(raw),
                _ => {
                    record.metrics.insert(key.to_string(), self.null_config.parse_cell(raw));
                }
            }
        }
        
        match (entity, year) {
            (Some(entity), Some(year)) => {
                record.entity = entity.to_string();
                record.year = year;
                Some(record)
            }
            _ => {
                self.skipped += 1;
                None
            }
        }
    }
    
    /// Log how many rows were dropped, if any
    pub fn report(&self, source_name: &str) {
        if self.skipped > 0 {
            warn!("{}: skipped {} rows without a usable entity or year", source_name, self.skipped);
        }
    }
    
    fn json_cell(&self, value: &Value) -> MetricValue {
        match value {
            Value::Null => MetricValue::Missing,
            Value::Number(n) => n.as_f64().map(MetricValue::Number).unwrap_or(MetricValue::Missing),
            Value::String(s) => self.null_config.parse_cell(s),
            other => MetricValue::Text(other.to_string()),
        }
    }
}

fn json_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

/// Integer prefix of a string: optional sign then digits, like "2019" or "2019.0"
fn parse_leading_int(raw: &str) -> Option<i32> {
    let trimmed = raw.trim_start();
    let sign_len = usize::from(trimmed.starts_with(|c: char| c == '-' || c == '+'));
    let digits_len = trimmed[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    
    if digits_len == 0 {
        return None;
    }
    trimmed[..sign_len + digits_len].parse().ok()
}
