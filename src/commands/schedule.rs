//! Run the pipeline on its daily schedule.

use tracing::info;

use crate::{cli::RunOptions, connections::ConnectionRegistry, schedule::DailySchedule, Result};

use super::common::{build_pipeline, ConnIds};

/// Handle the schedule command; returns after Ctrl-C.
pub async fn handle_schedule(
    registry: &ConnectionRegistry,
    conn_ids: &ConnIds,
    options: &RunOptions,
) -> Result<()> {
    let pipeline = build_pipeline(registry, conn_ids, options)?;
    let policy = options.retry_policy();
    info!(
        retries = policy.retries,
        retry_delay = ?policy.delay,
        "starting daily APOD schedule (00:00 UTC)"
    );

    DailySchedule::default().run_loop(&pipeline).await
}
