//! File-backed bid storage on SQLite.

use crate::core::{BidRecord, BidStore};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const CREATE_TABLE_STATEMENT: &str = "CREATE TABLE IF NOT EXISTS bids (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bid TEXT NOT NULL
)";
const INSERT_BID_STATEMENT: &str = "INSERT INTO bids (bid) VALUES (?1)";
const SELECT_BIDS_STATEMENT: &str = "SELECT id, bid FROM bids ORDER BY id";

// Number of VM instructions between deadline checks while a statement runs.
const PROGRESS_OPS: i32 = 100;

/// Bid store holding a single SQLite connection. Writes are serialized on it.
pub struct SqliteBidStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBidStore {
    /// Opens (or creates) the database file and ensures the `bids` table exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        let store = Self::from_connection(conn)?;
        info!("Database initialized at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute(CREATE_TABLE_STATEMENT, [])
            .context("Failed to create table")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

fn insert_bid(conn: &Connection, bid: &str, expires_at: Instant) -> Result<i64> {
    if Instant::now() >= expires_at {
        return Err(anyhow!("Deadline exceeded before insert started"));
    }

    // Aborts the statement with SQLITE_INTERRUPT once the deadline passes.
    conn.progress_handler(PROGRESS_OPS, Some(move || Instant::now() >= expires_at));
    let result = conn
        .prepare_cached(INSERT_BID_STATEMENT)
        .and_then(|mut stmt| stmt.execute(params![bid]))
        .map(|_| conn.last_insert_rowid());
    conn.progress_handler(0, None::<fn() -> bool>);

    result.context("Error executing insert statement")
}

#[async_trait]
impl BidStore for SqliteBidStore {
    async fn save_bid(&self, bid: &str, deadline: Duration) -> Result<i64> {
        let expires_at = Instant::now() + deadline;
        let conn = Arc::clone(&self.conn);
        let bid = bid.to_string();

        let insert = tokio::task::spawn_blocking(move || -> Result<i64> {
            let conn = conn
                .lock()
                .map_err(|_| anyhow!("Database connection lock poisoned"))?;
            insert_bid(&conn, &bid, expires_at)
        });

        let id = tokio::time::timeout(deadline, insert)
            .await
            .map_err(|_| anyhow!("Deadline of {:?} exceeded while saving bid", deadline))?
            .context("Insert task failed")??;

        debug!(id, "Inserted bid row");
        Ok(id)
    }

    async fn bids(&self) -> Result<Vec<BidRecord>> {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<Vec<BidRecord>> {
            let conn = conn
                .lock()
                .map_err(|_| anyhow!("Database connection lock poisoned"))?;
            let mut stmt = conn.prepare(SELECT_BIDS_STATEMENT)?;
            let rows = stmt.query_map([], |row| {
                Ok(BidRecord {
                    id: row.get(0)?,
                    bid: row.get(1)?,
                })
            })?;
            let bids = rows
                .collect::<rusqlite::Result<Vec<_>>>()
                .context("Failed to read bids")?;
            Ok(bids)
        })
        .await
        .context("Query task failed")?
    }
}
