//! SQLite Counter Store
//!
//! Implements CounterStore on a local SQLite file. Used for local
//! development where no DynamoDB table is available.

use crate::domain::entities::VisitorCount;
use crate::domain::errors::StoreError;
use crate::domain::ports::CounterStore;
use anyhow::Result;
use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::sync::Arc;

/// Single-statement upsert; SQLite serializes writers, so concurrent
/// increments never lose updates.
const INCREMENT_SQL: &str = "INSERT INTO counters (id, count_num) VALUES (?1, ?2)
     ON CONFLICT(id) DO UPDATE SET count_num = count_num + excluded.count_num
     RETURNING count_num";

/// SQLite-backed counter store.
///
/// Holds one connection behind a mutex; every increment runs on the
/// blocking thread pool.
pub struct SqliteCounterStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCounterStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        tracing::info!("sqlite counter store opened at {}", db_path);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS counters (
                id TEXT PRIMARY KEY,
                count_num INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Read a counter without modifying it (for tooling and tests).
    pub fn current(&self, counter_id: &str) -> Result<Option<i64>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT count_num FROM counters WHERE id = ?1")?;
        let mut rows = stmt.query(params![counter_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn increment_blocking(conn: &Mutex<Connection>, counter_id: &str, delta: i64) -> rusqlite::Result<i64> {
        let conn = conn.lock();
        conn.query_row(INCREMENT_SQL, params![counter_id, delta], |row| row.get(0))
    }
}

#[async_trait]
impl CounterStore for SqliteCounterStore {
    #[tracing::instrument(name = "sqlite.increment", skip(self))]
    async fn increment(&self, counter_id: &str, delta: i64) -> Result<VisitorCount, StoreError> {
        let conn = self.conn.clone();
        let counter_id = counter_id.to_string();

        match tokio::task::spawn_blocking(move || Self::increment_blocking(&conn, &counter_id, delta)).await {
            Ok(Ok(value)) => Ok(VisitorCount(value)),
            Ok(Err(e)) => Err(StoreError::Backend(e.to_string())),
            Err(e) => Err(StoreError::Backend(format!("spawn_blocking error: {}", e))),
        }
    }
}
