use async_trait::async_trait;

use se_core::Table;

use super::DataSource;
use crate::DataError;

/// Hands out a table that is already in memory
pub struct MemorySource {
    table: Table,
    name: String,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self { table, name: name.into() }
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self) -> Result<Table, DataError> {
        Ok(self.table.clone())
    }
    
    fn source_name(&self) -> &str {
        &self.name
    }
}
