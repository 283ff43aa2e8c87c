//! JSON form of the dataset: one array of flat objects

use std::path::PathBuf;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use se_core::Table;

use super::{DataSource, RowParser};
use crate::config::NullConfig;
use crate::DataError;

/// Static JSON asset holding the whole dataset
pub struct JsonSource {
    path: PathBuf,
    null_config: NullConfig,
    name: String,
}

impl JsonSource {
    pub fn new(path: PathBuf, null_config: NullConfig) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.json")
            .to_string();
        
        Self { path, null_config, name }
    }
    
    /// Parse an already-read document
    pub fn parse(bytes: &[u8], null_config: &NullConfig, name: &str) -> Result<Table, DataError> {
        let document: Value = serde_json::from_slice(bytes)?;
        let rows = match document {
            Value::Array(rows) => rows,
            other => {
                return Err(DataError::Format(format!(
                    "{}: expected an array of records, found {}", name, json_kind(&other)
                )))
            }
        };
        
        let mut parser = RowParser::new(null_config);
        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            match row {
                Value::Object(object) => {
                    if let Some(record) = parser.json_row(object) {
                        records.push(record);
                    }
                }
                other => {
                    return Err(DataError::Format(format!(
                        "{}: expected record objects, found {}", name, json_kind(other)
                    )))
                }
            }
        }
        parser.report(name);
        
        Ok(Table::new(records))
    }
}

#[async_trait]
impl DataSource for JsonSource {
    async fn fetch(&self) -> Result<Table, DataError> {
        info!("Reading JSON dataset {:?}", self.path);
        
        let bytes = tokio::fs::read(&self.path).await?;
        let null_config = self.null_config.clone();
        let name = self.name.clone();
        let table = tokio::task::spawn_blocking(move || Self::parse(&bytes, &null_config, &name)).await??;
        
        debug!("Parsed {} records from {}", table.len(), self.name);
        Ok(table)
    }
    
    fn source_name(&self) -> &str {
        &self.name
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    
    #[tokio::test]
    async fn test_read_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[
                {{"Entity": "Chile", "Year": 2019, "gdp_per_capita": 14896.4}},
                {{"Entity": "Chile", "Year": 2020, "gdp_per_capita": null}}
            ]"#
        )
        .unwrap();
        
        let source = JsonSource::new(file.path().to_path_buf(), NullConfig::default());
        let table = source.fetch().await.unwrap();
        
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].metric("gdp_per_capita"), Some(14896.4));
        assert_eq!(table.records()[1].metric("gdp_per_capita"), None);
    }
    
    #[test]
    fn test_empty_array_is_empty_table() {
        let table = JsonSource::parse(b"[]", &NullConfig::default(), "empty.json").unwrap();
        assert!(table.is_empty());
    }
    
    #[test]
    fn test_layout_errors() {
        let config = NullConfig::default();
        assert!(matches!(JsonSource::parse(br#"{"Entity": "x"}"#, &config, "x"), Err(DataError::Format(_))));
        assert!(matches!(JsonSource::parse(b"[1, 2]", &config, "x"), Err(DataError::Format(_))));
        assert!(matches!(JsonSource::parse(b"[{", &config, "x"), Err(DataError::Json(_))));
    }
}
