//! Inserts and read-back queries for `apod_data`

use super::{models::StoredApod, schema::ApodDatabase};
use crate::apod::ApodRecord;
use crate::error::Result;
use rusqlite::{params, types::ValueRef, OptionalExtension, Row};
use tracing::{error, info};

const SELECT_COLUMNS: &str = "SELECT id, title, explanation, url, date, media_type FROM apod_data";

impl ApodDatabase {
    /// Append one record and return its row id.
    ///
    /// There is no uniqueness constraint, so loading the same date twice
    /// produces two rows.
    pub fn insert_record(&self, record: &ApodRecord) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO apod_data (title, explanation, url, date, media_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.title,
                    record.explanation,
                    record.url,
                    record.date,
                    record.media_type
                ],
            )
            .map_err(|e| {
                error!(error = %e, date = %record.date, "Failed to load APOD record");
                e
            })?;

        let id = self.conn.last_insert_rowid();
        info!(id, date = %record.date, "Inserted APOD record");
        Ok(id)
    }

    /// The most recently inserted row, if any.
    pub fn latest_record(&self) -> Result<Option<StoredApod>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT 1"))?;
        let record = stmt.query_row([], row_to_stored).optional()?;
        Ok(record)
    }

    /// Up to `limit` rows, newest first.
    pub fn recent_records(&self, limit: u32) -> Result<Vec<StoredApod>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC LIMIT ?1"))?;
        let rows = stmt.query_map(params![limit], row_to_stored)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Number of rows in `apod_data`.
    pub fn count_records(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM apod_data", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn row_to_stored(row: &Row) -> rusqlite::Result<StoredApod> {
    Ok(StoredApod {
        id: row.get(0)?,
        title: text_column(row, 1)?,
        explanation: text_column(row, 2)?,
        url: text_column(row, 3)?,
        date: text_column(row, 4)?,
        media_type: text_column(row, 5)?,
    })
}

// Rows written outside the pipeline may hold non-text values in any column.
fn text_column(row: &Row, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    })
}
