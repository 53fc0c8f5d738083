//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network/transport failure reaching the remote replica.
    #[error("network error: {0}")]
    Network(String),

    /// An expected table does not exist on the remote backend.
    #[error("remote table missing: {0}")]
    SchemaMissing(String),

    /// The remote backend rejected a read or write by policy.
    #[error("remote permission denied: {0}")]
    PermissionDenied(String),

    /// A payload (remote response or local import) is not well-formed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Local store error.
    #[error("store error: {0}")]
    Store(#[from] dugsi_store::StoreError),

    /// A reconciliation pass is already running.
    #[error("a sync pass is already in progress")]
    SyncInProgress,
}
