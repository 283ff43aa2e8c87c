//! Dataset loading and the query engine for the sustainable-energy dashboard

pub mod cache;
pub mod config;
pub mod query;
pub mod resolve;
pub mod sources;

use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use cache::DatasetCache;
pub use config::{DashboardConfig, NullConfig, SourceFormat, YearDefaults};
pub use resolve::CountryResolver;
pub use sources::{CsvSource, DataSource, JsonSource, MemorySource};

/// Errors that can occur while loading the dataset.
///
/// Any of these is fatal to the dashboard: the caller surfaces it and may
/// retry the load, nothing here retries on its own.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    
    #[error("CSV parsing error: {0}")]
    Csv(String),
    
    #[error("Unexpected dataset layout: {0}")]
    Format(String),
    
    #[error("Invalid configuration: {0}")]
    Config(String),
    
    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

/// The load failure kind surfaced to dashboard callers
pub type LoadError = DataError;

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}
