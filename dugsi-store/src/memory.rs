//! In-memory durable store, for tests and ephemeral sessions.

use crate::{DurableStore, StoreResult};
use dugsi_types::{Record, TableId};
use std::collections::HashMap;
use std::sync::Mutex;

/// Durable store that keeps everything in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<TableId, Vec<Record>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, table: TableId) -> StoreResult<Vec<Record>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default())
    }

    fn set(&self, table: TableId, records: &[Record]) -> StoreResult<()> {
        self.tables.lock().unwrap().insert(table, records.to_vec());
        Ok(())
    }
}
