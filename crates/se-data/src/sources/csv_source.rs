use std::path::PathBuf;
use std::fs::File;
use std::io::BufReader;
use async_trait::async_trait;
use csv::ReaderBuilder;
use tracing::{debug, info};

use se_core::{Record, Table};

use super::{DataSource, RowParser};
use crate::config::NullConfig;
use crate::DataError;

/// CSV form of the dataset: a header row naming the fields, one record per line
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Missing-value handling for cells
    null_config: NullConfig,
    /// Display name
    name: String,
}

impl CsvSource {
    /// Create a new CSV source from a file path
    pub fn new(path: PathBuf, null_config: NullConfig) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
            .to_string();
        
        Self { path, null_config, name }
    }
    
    /// Read every row on a blocking thread
    fn read_all(path: PathBuf, null_config: NullConfig, name: String) -> Result<Table, DataError> {
        let file = File::open(&path)?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(BufReader::new(file));
        
        let headers = csv_reader.headers()?.clone();
        if !headers.iter().any(|h| h == se_core::record::ENTITY_FIELD)
            || !headers.iter().any(|h| h == se_core::record::YEAR_FIELD)
        {
            return Err(DataError::Format(format!(
                "{} has no Entity/Year header", name
            )));
        }
        
        let mut parser = RowParser::new(&null_config);
        let mut records: Vec<Record> = Vec::new();
        for result in csv_reader.records() {
            let row = result?;
            if let Some(record) = parser.csv_row(&headers, &row) {
                records.push(record);
            }
        }
        parser.report(&name);
        
        Ok(Table::new(records))
    }
}

#[async_trait]
impl DataSource for CsvSource {
    async fn fetch(&self) -> Result<Table, DataError> {
        info!("Reading CSV dataset {:?}", self.path);
        
        let path = self.path.clone();
        let null_config = self.null_config.clone();
        let name = self.name.clone();
        let table = tokio::task::spawn_blocking(move || Self::read_all(path, null_config, name)).await??;
        
        debug!("Parsed {} records from {}", table.len(), self.name);
        Ok(table)
    }
    
    fn source_name(&self) -> &str {
        &self.name
    }
}
