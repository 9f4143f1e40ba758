//! Run the pipeline once, outside the daily schedule.

use chrono::{NaiveDate, Utc};

use crate::{cli::RunOptions, connections::ConnectionRegistry, pipeline::RunReport, Result};

use super::common::{build_pipeline, ConnIds};

/// Handle the run command
///
/// The interval is `date` when given, otherwise today (UTC). Only an explicit
/// `date` is forwarded to the API; without it the API serves its current day.
pub async fn handle_run(
    registry: &ConnectionRegistry,
    conn_ids: &ConnIds,
    options: &RunOptions,
    date: Option<NaiveDate>,
    as_json: bool,
) -> Result<RunReport> {
    let pipeline = build_pipeline(registry, conn_ids, options)?;
    let interval = date.unwrap_or_else(|| Utc::now().date_naive());

    let report = pipeline.run_interval(interval, date).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "✓ Loaded APOD for {}: {} (row {}, {} attempt(s))",
            display_or_dash(&report.record.date),
            display_or_dash(&report.record.title),
            report.row_id,
            report.attempts
        );
    }

    Ok(report)
}

pub(crate) fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
