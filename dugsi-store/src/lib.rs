//! Durable local record store for Dugsi.
//!
//! The app's working set lives in memory, mirrored to a small SQLite
//! database (one JSON payload per table) so the data survives restarts
//! and works fully offline. The sync layer reads snapshots from here and
//! writes merged tables back through [`RecordStore::replace`].
//!
//! # Architecture
//!
//! - [`DurableStore`] is the synchronous persistence seam; [`SqliteStore`]
//!   is the production implementation, [`MemoryStore`] the test one.
//! - [`RecordStore`] owns the authoritative in-memory tables and
//!   writes through to its durable store on every mutation.
//! - [`backup`] serializes all five tables to one JSON document and back.

pub mod backup;
mod error;
mod memory;
mod record_store;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record_store::RecordStore;
pub use sqlite::SqliteStore;

use dugsi_types::{Record, TableId};

/// Synchronous, process-local persistence for whole tables.
pub trait DurableStore: Send + Sync {
    /// Loads the stored records for a table. Missing tables read as empty.
    fn get(&self, table: TableId) -> StoreResult<Vec<Record>>;

    /// Replaces the stored records for a table.
    fn set(&self, table: TableId, records: &[Record]) -> StoreResult<()>;
}

impl<T: DurableStore + ?Sized> DurableStore for std::sync::Arc<T> {
    fn get(&self, table: TableId) -> StoreResult<Vec<Record>> {
        (**self).get(table)
    }

    fn set(&self, table: TableId, records: &[Record]) -> StoreResult<()> {
        (**self).set(table, records)
    }
}
