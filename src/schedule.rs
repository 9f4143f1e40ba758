//! Daily scheduling of the pipeline.
//!
//! The schedule fires at 00:00 UTC. A fire at the midnight that starts day
//! D+1 processes the interval for day D. Missed intervals are never caught
//! up: on start the latest completed interval runs once, then each following
//! fire runs as it comes due.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{error, info};

use crate::pipeline::ApodPipeline;
use crate::Result;

/// Fires once per day at a fixed UTC time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    fire_time: NaiveTime,
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            fire_time: NaiveTime::MIN,
        }
    }
}

impl DailySchedule {
    /// First fire strictly after `now`.
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive().and_time(self.fire_time).and_utc();
        if today > now {
            today
        } else {
            today + Duration::days(1)
        }
    }

    /// The interval closed by the fire at `fire`.
    pub fn interval_for(&self, fire: DateTime<Utc>) -> NaiveDate {
        fire.date_naive() - Duration::days(1)
    }

    /// The most recent interval whose fire is at or before `now`.
    pub fn latest_interval(&self, now: DateTime<Utc>) -> NaiveDate {
        let last_fire = self.next_fire_after(now) - Duration::days(1);
        self.interval_for(last_fire)
    }

    /// Run the latest interval, then every subsequent fire, until Ctrl-C.
    ///
    /// A failed interval is logged and does not stop the loop.
    pub async fn run_loop(&self, pipeline: &ApodPipeline) -> Result<()> {
        self.run_until(pipeline, tokio::signal::ctrl_c()).await
    }

    /// Like [`run_loop`](Self::run_loop), stopping when `shutdown` resolves.
    ///
    /// Shutdown is observed at any point: while waiting for a fire, during a
    /// run and during a retry delay. An interrupted run is abandoned.
    pub async fn run_until<F>(&self, pipeline: &ApodPipeline, shutdown: F) -> Result<()>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        tokio::pin!(shutdown);

        let startup = self.latest_interval(Utc::now());
        if stop_requested(shutdown.as_mut(), run_and_log(pipeline, startup)).await? {
            return Ok(());
        }

        loop {
            let now = Utc::now();
            let fire = self.next_fire_after(now);
            let wait = (fire - now).to_std().unwrap_or_default();
            info!(next_fire = %fire, "waiting for next scheduled interval");

            if stop_requested(shutdown.as_mut(), tokio::time::sleep(wait)).await? {
                return Ok(());
            }
            let interval = self.interval_for(fire);
            if stop_requested(shutdown.as_mut(), run_and_log(pipeline, interval)).await? {
                return Ok(());
            }
        }
    }
}

/// Drive `work` to completion unless `shutdown` resolves first.
///
/// Returns `Ok(true)` when the scheduler should stop.
async fn stop_requested<F, W>(shutdown: Pin<&mut F>, work: W) -> Result<bool>
where
    F: Future<Output = std::io::Result<()>>,
    W: Future<Output = ()>,
{
    tokio::select! {
        _ = work => Ok(false),
        res = shutdown => {
            res?;
            info!("shutdown requested, stopping scheduler");
            Ok(true)
        }
    }
}

async fn run_and_log(pipeline: &ApodPipeline, interval: NaiveDate) {
    if let Err(e) = pipeline.run_interval(interval, None).await {
        error!(%interval, error = %e, "scheduled interval marked failed");
    }
}
