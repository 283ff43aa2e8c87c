//! Dataset sources

pub mod csv_source;
pub mod json_source;
pub mod memory_source;
mod rows;

pub use csv_source::CsvSource;
pub use json_source::JsonSource;
pub use memory_source::MemorySource;
pub use rows::RowParser;

use async_trait::async_trait;
use se_core::Table;

use crate::DataError;

/// Something that can produce the whole dataset in one go
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch and parse the complete table
    async fn fetch(&self) -> Result<Table, DataError>;
    
    /// Get the source name/path
    fn source_name(&self) -> &str;
}
