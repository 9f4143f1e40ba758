//! NASA Astronomy Picture of the Day ETL
//!
//! Fetches the daily APOD record from NASA's public API, keeps five of its
//! fields and appends them to the `apod_data` table of a SQLite database.
//!
//! ## Pipeline
//!
//! Every interval runs four steps strictly in order; the first failure stops
//! the interval:
//!
//! 1. **create_table**: `CREATE TABLE IF NOT EXISTS apod_data (...)`
//! 2. **extract**: `GET {base}/planetary/apod?api_key={key}`
//! 3. **transform**: pick `title`, `explanation`, `url`, `date`, `media_type`,
//!    defaulting missing keys to `""`
//! 4. **load**: one parameterized `INSERT`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use apod_etl::{ApodClient, ApodDatabase, ApodPipeline, RetryPolicy};
//!
//! # async fn example() -> apod_etl::Result<()> {
//! let client = ApodClient::new("https://api.nasa.gov", "DEMO_KEY", Duration::from_secs(30))?;
//! let db = ApodDatabase::open("apod.db")?;
//! let pipeline = ApodPipeline::new(client, db, RetryPolicy::default());
//!
//! let today = chrono::Utc::now().date_naive();
//! let report = pipeline.run_interval(today, None).await?;
//! println!("loaded {} into row {}", report.record.title, report.row_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Connections are registered through environment variables:
//! ```bash
//! export APOD_CONN_NASA_API='https://api.nasa.gov?api_key=DEMO_KEY'
//! export APOD_CONN_APOD_DB='sqlite:///var/lib/apod/apod.db'
//! ```

pub mod apod;
pub mod cli;
pub mod commands;
pub mod connections;
pub mod error;
pub mod pipeline;
pub mod schedule;
pub mod storage;

// Re-export commonly used types
pub use apod::{transform, ApodClient, ApodRecord};
pub use cli::types::ids::ConnId;
pub use connections::{Connection, ConnectionRegistry};
pub use error::{ApodError, Result};
pub use pipeline::{ApodPipeline, RetryPolicy, RunReport, Step};
pub use schedule::DailySchedule;
pub use storage::{ApodDatabase, StoredApod, APOD_TABLE};

pub const HTTP_CONN_ID_ENV_VAR: &str = "APOD_HTTP_CONN_ID";
pub const DB_CONN_ID_ENV_VAR: &str = "APOD_DB_CONN_ID";
pub const DEFAULT_HTTP_CONN_ID: &str = "nasa_api";
/// Default database connection; the store is SQLite, so the id names no engine.
pub const DEFAULT_DB_CONN_ID: &str = "apod_db";
