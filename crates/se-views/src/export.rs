//! CSV/JSON export of derived views

use std::path::Path;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use se_core::{RankedValue, YearValue};

/// Errors raised while exporting
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Serialize rows as CSV with a header row taken from the field names.
///
/// Fields containing the separator or quotes are quoted. No rows gives an
/// empty document.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    finish(writer)
}

/// `Rank,Country,<label>` table of a ranking
pub fn ranking_csv(label: &str, rows: &[RankedValue]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Rank", "Country", label])?;
    for (index, row) in rows.iter().enumerate() {
        writer.write_record([(index + 1).to_string(), row.entity.clone(), row.value.to_string()])?;
    }
    finish(writer)
}

/// `Year,<label>` table of yearly values
pub fn yearly_csv(label: &str, rows: &[YearValue]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Year", label])?;
    for row in rows {
        writer.write_record([row.year.to_string(), row.value.to_string()])?;
    }
    finish(writer)
}

/// Pretty JSON dump of any serializable view
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// File name like `Renewable-Energy-(%)-2020.csv`
pub fn export_file_name(label: &str, year: i32, format: ExportFormat) -> String {
    let stem: String = label
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    format!("{}-{}.{}", stem, year, format.extension())
}

/// Write an export to disk
pub fn write_export(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents)?;
    info!("Exported data to: {:?}", path);
    Ok(())
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
