//! The sync engine — one sequential reconciliation pass at a time.
//!
//! Tables are processed one at a time to keep write-back ordering simple;
//! a single table's remote failure never aborts the rest of the pass.
//! An `in_flight` flag rejects a second concurrent pass so a scheduled
//! pass and a manual one cannot race each other's push-backs with stale
//! merges.

use crate::error::{SyncError, SyncResult};
use crate::reconcile::{merge_snapshots, MergedTable};
use crate::remote::RemoteReplica;
use crate::report::{SyncReport, TableOutcome};
use dugsi_store::RecordStore;
use dugsi_types::TableId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Reconciles the local record store against a remote replica.
pub struct SyncEngine {
    store: Arc<RecordStore>,
    remote: Arc<dyn RemoteReplica>,
    in_flight: AtomicBool,
}

impl SyncEngine {
    /// Creates an engine over an explicit store and replica.
    pub fn new(store: Arc<RecordStore>, remote: Arc<dyn RemoteReplica>) -> Self {
        Self {
            store,
            remote,
            in_flight: AtomicBool::new(false),
        }
    }

    /// The record store this engine reconciles.
    #[must_use]
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Runs one reconciliation pass over every table.
    ///
    /// Returns `SyncError::SyncInProgress` when a pass (or bulk push) is
    /// already running. A table whose fetch fails is skipped and
    /// reported; a table whose push-back fails keeps its locally
    /// persisted merge and the failure is reported. Only a local store
    /// failure aborts the pass.
    pub async fn sync_all(&self) -> SyncResult<SyncReport> {
        let _guard = self.acquire()?;
        let mut report = SyncReport::default();

        for table in TableId::ALL {
            let remote_records = match self.remote.fetch_table(table).await {
                Ok(records) => records,
                Err(error) => {
                    warn!(%table, %error, "fetch failed, skipping table");
                    report.record(table, TableOutcome::FetchFailed { error });
                    continue;
                }
            };

            let local = self.store.snapshot(table);
            let MergedTable { records, needs_push } = merge_snapshots(&local, &remote_records);

            if !needs_push {
                report.record(table, TableOutcome::Unchanged);
                continue;
            }

            // Local durability first; it is not rolled back if the
            // push-back below fails.
            self.store.replace(table, records.clone())?;

            match self.remote.upsert_table(table, &records).await {
                Ok(()) => {
                    info!(%table, count = records.len(), "table synced");
                    report.record(
                        table,
                        TableOutcome::Synced {
                            records: records.len(),
                        },
                    );
                }
                Err(error) => {
                    warn!(%table, %error, "push-back failed, local copy kept");
                    report.record(
                        table,
                        TableOutcome::PushFailed {
                            records: records.len(),
                            error,
                        },
                    );
                }
            }
        }

        Ok(report)
    }

    /// Uploads every non-empty local table to the remote replica, with
    /// no merging — the one-shot "move my local data to the cloud"
    /// operation.
    pub async fn push_all(&self) -> SyncResult<SyncReport> {
        let _guard = self.acquire()?;
        let mut report = SyncReport::default();

        for table in TableId::ALL {
            let records = self.store.snapshot(table);
            if records.is_empty() {
                report.record(table, TableOutcome::Unchanged);
                continue;
            }
            match self.remote.upsert_table(table, &records).await {
                Ok(()) => {
                    info!(%table, count = records.len(), "table uploaded");
                    report.record(
                        table,
                        TableOutcome::Synced {
                            records: records.len(),
                        },
                    );
                }
                Err(error) => {
                    warn!(%table, %error, "upload failed");
                    report.record(
                        table,
                        TableOutcome::PushFailed {
                            records: records.len(),
                            error,
                        },
                    );
                }
            }
        }

        Ok(report)
    }

    fn acquire(&self) -> SyncResult<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(SyncError::SyncInProgress);
        }
        Ok(InFlightGuard { flag: &self.in_flight })
    }
}

/// Clears the in-flight flag when a pass ends, even on early return.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
