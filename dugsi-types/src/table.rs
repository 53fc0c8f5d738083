//! The closed set of syncable tables.
//!
//! A proper enumeration rather than a runtime whitelist of names, so
//! every match over tables is checked exhaustively at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of one of the five synced tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableId {
    Students,
    Teachers,
    Attendance,
    Finance,
    Exams,
}

impl TableId {
    /// All tables, in the order a reconciliation pass visits them.
    pub const ALL: [TableId; 5] = [
        TableId::Students,
        TableId::Teachers,
        TableId::Attendance,
        TableId::Finance,
        TableId::Exams,
    ];

    /// The table name as used on the remote backend and in local storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TableId::Students => "students",
            TableId::Teachers => "teachers",
            TableId::Attendance => "attendance",
            TableId::Finance => "finance",
            TableId::Exams => "exams",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "students" => Ok(TableId::Students),
            "teachers" => Ok(TableId::Teachers),
            "attendance" => Ok(TableId::Attendance),
            "finance" => Ok(TableId::Finance),
            "exams" => Ok(TableId::Exams),
            other => Err(crate::Error::UnknownTable(other.to_string())),
        }
    }
}
