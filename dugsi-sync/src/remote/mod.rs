//! Remote replica abstraction.
//!
//! Defines a common interface over remote relational backends so the
//! engine can sync against anything that can fetch and upsert whole
//! tables keyed by record `id`.

mod supabase;

pub use supabase::{SupabaseConfig, SupabaseReplica};

use crate::error::SyncResult;
use async_trait::async_trait;
use dugsi_types::{Record, TableId};

/// Abstract remote replica interface.
///
/// The replica owns nothing: it is a passthrough to external storage.
/// `upsert` is insert-or-replace keyed by each record's `id`.
#[async_trait]
pub trait RemoteReplica: Send + Sync {
    /// Returns the name of the remote backend.
    fn provider_name(&self) -> &'static str;

    /// Probes the backend: reachable, schema present, writable policy.
    async fn check_connection(&self) -> SyncResult<()>;

    /// Fetches the full contents of one table.
    async fn fetch_table(&self, table: TableId) -> SyncResult<Vec<Record>>;

    /// Inserts-or-replaces the given records in one table, keyed by
    /// primary key `id`. The whole table is re-sent; this is a
    /// write-through, not a targeted diff-push.
    async fn upsert_table(&self, table: TableId, records: &[Record]) -> SyncResult<()>;
}
