//! Core type definitions for Dugsi.
//!
//! This crate defines the fundamental types shared by the store, sync and
//! access layers:
//! - Free-form records keyed by a stable string `id`
//! - The closed set of table identifiers
//! - Typed row schemas mirroring the remote backend's tables
//!
//! Presentation concerns (rendering, forms, printing) do not belong here
//! or anywhere else in this workspace.

mod record;
mod rows;
mod table;

pub use record::{Record, ID_FIELD};
pub use rows::{AttendanceEntry, ExamResult, FinanceEntry, Student, TableRow, Teacher};
pub use table::TableId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("record is missing the 'id' field")]
    MissingId,
}
