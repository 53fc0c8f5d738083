//! Bulk export and import of all five tables.
//!
//! Export produces a single JSON document keyed by table name, meant to
//! be saved under a date-stamped filename. Import is a full destructive
//! overwrite per table present in the document — no merging. A malformed
//! payload aborts the import before any table is touched.

use crate::{RecordStore, StoreResult};
use chrono::{NaiveDate, Utc};
use dugsi_types::{Record, TableId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The backup document: one optional array per known table. Unknown
/// keys in an imported document are ignored; missing keys leave the
/// corresponding table untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teachers: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance: Option<Vec<Record>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exams: Option<Vec<Record>>,
}

impl BackupDoc {
    fn table(&self, table: TableId) -> Option<&Vec<Record>> {
        match table {
            TableId::Students => self.students.as_ref(),
            TableId::Teachers => self.teachers.as_ref(),
            TableId::Attendance => self.attendance.as_ref(),
            TableId::Finance => self.finance.as_ref(),
            TableId::Exams => self.exams.as_ref(),
        }
    }
}

/// Serializes every table to one pretty-printed JSON document.
pub fn export_json(store: &RecordStore) -> StoreResult<String> {
    let doc = BackupDoc {
        students: Some(store.snapshot(TableId::Students)),
        teachers: Some(store.snapshot(TableId::Teachers)),
        attendance: Some(store.snapshot(TableId::Attendance)),
        finance: Some(store.snapshot(TableId::Finance)),
        exams: Some(store.snapshot(TableId::Exams)),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Date-stamped filename for an exported backup.
#[must_use]
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("dugsi_backup_{}.json", date.format("%Y-%m-%d"))
}

/// [`backup_file_name`] for today's (UTC) date.
#[must_use]
pub fn backup_file_name_today() -> String {
    backup_file_name(Utc::now().date_naive())
}

/// Parses a backup document and replaces each table present in it.
/// Returns the tables that were replaced. The whole document is parsed
/// up front, so a parse error leaves every table untouched.
pub fn import_json(store: &RecordStore, json: &str) -> StoreResult<Vec<TableId>> {
    let doc: BackupDoc = serde_json::from_str(json)?;

    let mut replaced = Vec::new();
    for table in TableId::ALL {
        if let Some(records) = doc.table(table) {
            store.replace(table, records.clone())?;
            replaced.push(table);
        }
    }

    info!(tables = replaced.len(), "imported backup");
    Ok(replaced)
}
