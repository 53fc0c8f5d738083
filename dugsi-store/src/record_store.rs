//! The authoritative in-memory record store.
//!
//! An explicitly constructed instance (no module-level singleton) that
//! loads every table from its durable store on open and writes through
//! on every mutation. The reconciler reads snapshots from here and
//! installs merged tables via [`RecordStore::replace`].

use crate::{DurableStore, StoreError, StoreResult};
use dugsi_types::{Record, TableId};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory tables mirrored to a [`DurableStore`].
pub struct RecordStore {
    durable: Box<dyn DurableStore>,
    tables: RwLock<HashMap<TableId, Vec<Record>>>,
}

impl RecordStore {
    /// Opens the store, loading every table from durable storage.
    pub fn open(durable: impl DurableStore + 'static) -> StoreResult<Self> {
        let mut tables = HashMap::new();
        for table in TableId::ALL {
            let records = durable.get(table)?;
            debug!(table = %table, count = records.len(), "loaded table");
            tables.insert(table, records);
        }
        Ok(Self {
            durable: Box::new(durable),
            tables: RwLock::new(tables),
        })
    }

    /// A point-in-time copy of a table's records.
    #[must_use]
    pub fn snapshot(&self, table: TableId) -> Vec<Record> {
        self.tables
            .read()
            .unwrap()
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of records currently in a table.
    #[must_use]
    pub fn len(&self, table: TableId) -> usize {
        self.tables
            .read()
            .unwrap()
            .get(&table)
            .map_or(0, Vec::len)
    }

    /// Whether a table currently holds no records.
    #[must_use]
    pub fn is_empty(&self, table: TableId) -> bool {
        self.len(table) == 0
    }

    /// Replaces a table wholesale: persists first, then swaps the
    /// in-memory copy. On a persistence failure the in-memory table is
    /// left unchanged.
    pub fn replace(&self, table: TableId, records: Vec<Record>) -> StoreResult<()> {
        self.durable.set(table, &records)?;
        self.tables.write().unwrap().insert(table, records);
        Ok(())
    }

    /// Inserts or updates one record by its `id`, preserving the
    /// position of an updated record.
    pub fn upsert(&self, table: TableId, record: Record) -> StoreResult<()> {
        let id = record
            .id()
            .ok_or_else(|| StoreError::InvalidData("record has no id".to_string()))?
            .to_string();

        let mut updated = self.snapshot(table);
        match updated.iter_mut().find(|r| r.id() == Some(id.as_str())) {
            Some(existing) => *existing = record,
            None => updated.push(record),
        }
        self.replace(table, updated)
    }

    /// Removes one record by `id`. Returns whether anything was removed.
    pub fn remove(&self, table: TableId, id: &str) -> StoreResult<bool> {
        let mut updated = self.snapshot(table);
        let before = updated.len();
        updated.retain(|r| r.id() != Some(id));
        if updated.len() == before {
            return Ok(false);
        }
        self.replace(table, updated)?;
        Ok(true)
    }
}
