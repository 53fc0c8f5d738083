//! Typed row schemas for the five tables.
//!
//! The sync layer treats every row as a free-form [`Record`]; these
//! structs give callers a typed view matching the remote backend's
//! column names (camelCase on the wire). Conversion goes through
//! serde_json in both directions.

use crate::{Record, TableId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed row bound to the table it lives in.
pub trait TableRow: Serialize + DeserializeOwned {
    /// The table this row type belongs to.
    const TABLE: TableId;

    /// Converts the typed row into a free-form record.
    fn to_record(&self) -> crate::Result<Record> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(Record::from_map(fields)),
            // Row structs always serialize to objects.
            _ => Err(crate::Error::MissingId),
        }
    }

    /// Parses a typed row out of a free-form record.
    fn from_record(record: &Record) -> crate::Result<Self> {
        Ok(serde_json::from_value(Value::Object(record.fields().clone()))?)
    }
}

/// A student enrollment row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub class_level: Option<String>,
    #[serde(default)]
    pub birthplace: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub guardian: Option<String>,
    #[serde(default)]
    pub guardian_phone: Option<String>,
    #[serde(default)]
    pub registered_at: Option<String>,
}

impl TableRow for Student {
    const TABLE: TableId = TableId::Students;
}

/// A teaching staff row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl TableRow for Teacher {
    const TABLE: TableId = TableId::Teachers;
}

/// One day's attendance mark for one student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
}

impl TableRow for AttendanceEntry {
    const TABLE: TableId = TableId::Attendance;
}

/// An income or expense entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
}

impl TableRow for FinanceEntry {
    const TABLE: TableId = TableId::Finance;
}

/// A student's scores for one exam sitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: String,
    pub student_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub scores: Vec<f64>,
    #[serde(default)]
    pub subject_headers: Vec<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl TableRow for ExamResult {
    const TABLE: TableId = TableId::Exams;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_record_round_trip() {
        let student = Student {
            id: "S001".to_string(),
            name: "Ayaan Mohamed".to_string(),
            age: Some(12),
            class_level: Some("Form 2".to_string()),
            guardian_phone: Some("615000000".to_string()),
            ..Default::default()
        };

        let record = student.to_record().unwrap();
        assert_eq!(record.id(), Some("S001"));
        // Wire names are camelCase.
        assert!(record.get("classLevel").is_some());
        assert!(record.get("guardianPhone").is_some());

        let back = Student::from_record(&record).unwrap();
        assert_eq!(back, student);
    }

    #[test]
    fn finance_kind_maps_to_type_field() {
        let entry = FinanceEntry {
            id: "f1".to_string(),
            kind: "income".to_string(),
            amount: 150.0,
            ..Default::default()
        };
        let record = entry.to_record().unwrap();
        assert_eq!(
            record.get("type"),
            Some(&serde_json::Value::String("income".into()))
        );
    }

    #[test]
    fn exam_scores_survive_as_arrays() {
        let exam = ExamResult {
            id: "e1".to_string(),
            student_id: "S001".to_string(),
            kind: "Term 1".to_string(),
            scores: vec![85.0, 92.0],
            subject_headers: vec!["Math".to_string(), "Arabic".to_string()],
            date: Some("2024-03-20".to_string()),
        };
        let record = exam.to_record().unwrap();
        let back = ExamResult::from_record(&record).unwrap();
        assert_eq!(back.scores, vec![85.0, 92.0]);
        assert_eq!(back.subject_headers.len(), 2);
    }

    #[test]
    fn row_types_bind_to_their_tables() {
        assert_eq!(Student::TABLE, TableId::Students);
        assert_eq!(Teacher::TABLE, TableId::Teachers);
        assert_eq!(AttendanceEntry::TABLE, TableId::Attendance);
        assert_eq!(FinanceEntry::TABLE, TableId::Finance);
        assert_eq!(ExamResult::TABLE, TableId::Exams);
    }
}
