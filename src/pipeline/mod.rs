//! The four-step APOD pipeline and its retry policy.
//!
//! One interval runs `create_table -> extract -> transform -> load` strictly in
//! order. Each step hands its output to the next by value; the first failure
//! stops the chain and the whole interval is retried per [`RetryPolicy`].

use std::cell::Cell;
use std::fmt;
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::apod::{transform, ApodClient, ApodRecord};
use crate::error::{ApodError, Result};
use crate::storage::ApodDatabase;

/// A pipeline step, used to label logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CreateTable,
    Extract,
    Transform,
    Load,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::CreateTable => "create_table",
            Step::Extract => "extract",
            Step::Transform => "transform",
            Step::Load => "load",
        };
        f.write_str(name)
    }
}

/// Fixed-delay retry applied to a whole interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// Single attempt, no retry.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.retries as usize)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1, Duration::from_secs(300))
    }
}

/// Outcome of a successful interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub interval: NaiveDate,
    pub attempts: u32,
    pub row_id: i64,
    pub record: ApodRecord,
}

/// Fetches from one APOD connection and loads into one database.
pub struct ApodPipeline {
    client: ApodClient,
    db: ApodDatabase,
    retry: RetryPolicy,
}

impl ApodPipeline {
    pub fn new(client: ApodClient, db: ApodDatabase, retry: RetryPolicy) -> Self {
        Self { client, db, retry }
    }

    pub fn database(&self) -> &ApodDatabase {
        &self.db
    }

    /// Run all four steps once. `date` asks the API for a specific day.
    pub async fn run_once(
        &self,
        interval: NaiveDate,
        date: Option<NaiveDate>,
    ) -> Result<(i64, ApodRecord)> {
        info!(%interval, "starting APOD interval");

        self.db
            .create_table()
            .map_err(|e| step_failed(Step::CreateTable, e))?;

        let body = self
            .client
            .fetch_apod(date)
            .await
            .map_err(|e| step_failed(Step::Extract, e))?;

        let record = transform(&body);
        info!(step = %Step::Transform, title = %record.title, "Transformed APOD data");

        let row_id = self
            .db
            .insert_record(&record)
            .map_err(|e| step_failed(Step::Load, e))?;

        Ok((row_id, record))
    }

    /// Run the interval, retrying the whole chain on failure.
    pub async fn run_interval(
        &self,
        interval: NaiveDate,
        date: Option<NaiveDate>,
    ) -> Result<RunReport> {
        let attempts = Cell::new(0u32);

        let result = (|| {
            attempts.set(attempts.get() + 1);
            self.run_once(interval, date)
        })
        .retry(self.retry.backoff())
        .notify(|err: &ApodError, dur: Duration| {
            warn!(
                %interval,
                attempt = attempts.get(),
                error = %err,
                "interval failed, retrying in {:?}",
                dur
            );
        })
        .await;

        match result {
            Ok((row_id, record)) => {
                info!(%interval, attempts = attempts.get(), row_id, "interval succeeded");
                Ok(RunReport {
                    interval,
                    attempts: attempts.get(),
                    row_id,
                    record,
                })
            }
            Err(e) => {
                error!(%interval, attempts = attempts.get(), error = %e, "interval failed");
                Err(ApodError::IntervalFailed {
                    interval,
                    attempts: attempts.get(),
                    source: Box::new(e),
                })
            }
        }
    }
}

fn step_failed(step: Step, source: ApodError) -> ApodError {
    error!(%step, error = %source, "step failed");
    ApodError::Step {
        step,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests;
