//! Shared setup for the commands: connection ids, database and pipeline.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::{
    apod::ApodClient,
    cli::{types::ids::ConnId, RunOptions},
    connections::ConnectionRegistry,
    error::ApodError,
    pipeline::{ApodPipeline, RetryPolicy},
    storage::ApodDatabase,
    Result, DB_CONN_ID_ENV_VAR, DEFAULT_DB_CONN_ID, DEFAULT_HTTP_CONN_ID, HTTP_CONN_ID_ENV_VAR,
};

use super::resolve_conn_id;

/// The two registry entries a command works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnIds {
    pub http: ConnId,
    pub db: ConnId,
}

impl ConnIds {
    /// Resolve both ids from CLI flags, environment and defaults.
    pub fn resolve(http: Option<ConnId>, db: Option<ConnId>) -> Result<Self> {
        Ok(Self {
            http: resolve_conn_id(http, HTTP_CONN_ID_ENV_VAR, DEFAULT_HTTP_CONN_ID)?,
            db: resolve_conn_id(db, DB_CONN_ID_ENV_VAR, DEFAULT_DB_CONN_ID)?,
        })
    }
}

/// Default database file when no database connection is registered.
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or(ApodError::NoDataDir)?;
    Ok(data_dir.join("apod-etl").join("apod.db"))
}

/// Open the database named by `conn_id`, falling back to the default file.
pub fn open_database(registry: &ConnectionRegistry, conn_id: &ConnId) -> Result<ApodDatabase> {
    let path = match registry.find(conn_id)? {
        Some(conn) => conn.sqlite_path()?,
        None => {
            let path = default_database_path()?;
            debug!(%conn_id, path = %path.display(), "no database connection registered, using default");
            path
        }
    };

    info!(path = %path.display(), "opening database");
    ApodDatabase::open(path)
}

impl RunOptions {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_secs(self.retry_delay))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Wire the HTTP client and database into a pipeline.
pub fn build_pipeline(
    registry: &ConnectionRegistry,
    conn_ids: &ConnIds,
    options: &RunOptions,
) -> Result<ApodPipeline> {
    let http_conn = registry.get(&conn_ids.http)?;
    let client = ApodClient::from_connection(&http_conn, options.request_timeout())?;
    let db = open_database(registry, &conn_ids.db)?;
    Ok(ApodPipeline::new(client, db, options.retry_policy()))
}
