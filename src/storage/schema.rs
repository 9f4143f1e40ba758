//! Database schema and connection management

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use tracing::{error, info};

/// Destination table of the pipeline.
pub const APOD_TABLE: &str = "apod_data";

const CREATE_APOD_TABLE: &str = "CREATE TABLE IF NOT EXISTS apod_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(255),
    explanation TEXT,
    url TEXT,
    date TEXT,
    media_type VARCHAR(50)
)";

/// Database connection for APOD records
pub struct ApodDatabase {
    pub(crate) conn: Connection,
}

impl ApodDatabase {
    /// Open (or create) the database file at `path`.
    ///
    /// The table is not created here; that is the pipeline's first step.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Ensure `apod_data` exists. Safe to call on every run.
    pub fn create_table(&self) -> Result<()> {
        self.conn.execute(CREATE_APOD_TABLE, []).map_err(|e| {
            error!(error = %e, "Failed to create table {APOD_TABLE}");
            e
        })?;
        info!("Table {APOD_TABLE} created or already exists");
        Ok(())
    }

    /// Whether `apod_data` is present.
    pub fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [APOD_TABLE],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
