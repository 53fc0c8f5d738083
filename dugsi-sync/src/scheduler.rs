//! Periodic background reconciliation.
//!
//! Replaces a bare fixed-interval timer with a cancellable task: the
//! first pass runs immediately, then one per interval. Ticks that land
//! while a pass is still in flight are skipped via the engine's guard
//! rather than stacking up. Shutdown is cooperative — an in-flight pass
//! finishes (and may still write its results) before the task exits.

use crate::engine::SyncEngine;
use crate::error::SyncError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Configuration for the background scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between reconciliation passes.
    pub interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
        }
    }
}

/// Spawns and owns the background sync task.
pub struct SyncScheduler;

impl SyncScheduler {
    /// Starts the background task. The first pass runs right away.
    pub fn spawn(engine: Arc<SyncEngine>, config: SchedulerConfig) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match engine.sync_all().await {
                            Ok(report) => {
                                if report.has_changes() {
                                    info!(tables = report.changed_tables().len(), "background sync applied changes");
                                }
                                for (table, error) in report.failures() {
                                    warn!(%table, %error, "background sync table failure");
                                }
                            }
                            Err(SyncError::SyncInProgress) => {
                                debug!("previous pass still running, tick skipped");
                            }
                            Err(error) => {
                                warn!(%error, "background sync pass failed");
                            }
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("sync scheduler stopped");
        });

        SchedulerHandle { shutdown_tx, task }
    }
}

/// Handle to a running scheduler.
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signals shutdown and waits for the task to finish its current
    /// pass and exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }

    /// Whether the background task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
