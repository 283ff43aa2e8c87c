//! Process-wide dataset handle
//!
//! The table is fetched on the first `load()` and shared read-only afterwards.
//! The handle is passed around explicitly so every test can start from its
//! own table.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use se_core::Table;

use crate::sources::{DataSource, MemorySource};
use crate::DataError;

/// Lazily loaded, never invalidated dataset
pub struct DatasetCache {
    /// Where the table comes from
    source: Box<dyn DataSource>,
    /// The table once loaded
    table: OnceCell<Arc<Table>>,
}

impl DatasetCache {
    /// Create an empty cache around a source
    pub fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            table: OnceCell::new(),
        }
    }

    /// Create a cache that already holds `table`
    pub fn preloaded(table: Table) -> Self {
        let source = MemorySource::new("preloaded", table.clone());
        Self {
            source: Box::new(source),
            table: OnceCell::new_with(Some(Arc::new(table))),
        }
    }

    /// Get the table, fetching it on first use.
    ///
    /// Concurrent callers share a single fetch. A failed fetch leaves the cache
    /// empty, so the next call tries again.
    pub async fn load(&self) -> Result<Arc<Table>, DataError> {
        if let Some(table) = self.table.get() {
            debug!("Dataset served from cache");
            return Ok(table.clone());
        }

        let table = self
            .table
            .get_or_try_init(|| async {
                let table = self.source.fetch().await.map_err(|e| {
                    error!("Failed to load {}: {}", self.source.source_name(), e);
                    e
                })?;
                info!("Cached {} records from {}", table.len(), self.source.source_name());
                Ok::<_, DataError>(Arc::new(table))
            })
            .await?;

        Ok(table.clone())
    }

    /// The table if it has been loaded
    pub fn get(&self) -> Option<Arc<Table>> {
        self.table.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.table.initialized()
    }

    pub fn source_name(&self) -> &str {
        self.source.source_name()
    }
}
