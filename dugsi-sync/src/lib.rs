//! Local-cloud reconciliation engine for Dugsi.
//!
//! Keeps the on-device record store and a remote relational backend in
//! agreement, best-effort. There are no conflict-free data types and no
//! transactional guarantees here; the merge policy is deliberately
//! simple: remote wins on any field-level difference, local-only records
//! survive and trigger a push-back of the whole table.
//!
//! # Components
//!
//! - **Remote**: the [`RemoteReplica`] capability and its Supabase
//!   (PostgREST) implementation
//! - **Reconcile**: the pure snapshot merge ([`merge_snapshots`])
//! - **Engine**: one sequential pass over all tables with per-table
//!   failure isolation and an overlap guard
//! - **Scheduler**: the periodic background pass with cooperative
//!   shutdown
//!
//! # Sync Process
//!
//! 1. **Fetch**: pull the remote snapshot of a table
//! 2. **Merge**: reconcile against the local snapshot
//! 3. **Install**: persist the merged table locally (write-through)
//! 4. **Push-back**: re-upload the merged table when anything differed

mod engine;
mod error;
mod reconcile;
pub mod remote;
mod report;
mod scheduler;

pub use engine::SyncEngine;
pub use error::{SyncError, SyncResult};
pub use reconcile::{merge_snapshots, MergedTable};
pub use remote::{RemoteReplica, SupabaseConfig, SupabaseReplica};
pub use report::{SyncReport, TableOutcome};
pub use scheduler::{SchedulerConfig, SchedulerHandle, SyncScheduler};
