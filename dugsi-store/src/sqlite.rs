//! SQLite-backed durable store.
//!
//! One row per table: the table name and its records serialized as a
//! single JSON array, the same shape the data has on the wire.

use crate::{DurableStore, StoreResult};
use dugsi_types::{Record, TableId};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Durable store backed by a SQLite file.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS tables (
                name TEXT PRIMARY KEY,
                payload TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }
}

impl DurableStore for SqliteStore {
    fn get(&self, table: TableId) -> StoreResult<Vec<Record>> {
        let conn = self.conn.lock().unwrap();
        let payload: Option<String> = conn
            .query_row(
                "SELECT payload FROM tables WHERE name = ?1",
                params![table.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn set(&self, table: TableId, records: &[Record]) -> StoreResult<()> {
        let payload = serde_json::to_string(records)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO tables (name, payload) VALUES (?1, ?2)",
            params![table.as_str(), payload],
        )?;
        Ok(())
    }
}
