//! CLI argument definitions and parsing.

pub mod types;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use types::ids::ConnId;

/// Retry and timeout arguments shared by the commands that run the pipeline
#[derive(Debug, Clone, Args)]
pub struct RunOptions {
    /// How many times a failed interval is retried.
    #[clap(long, default_value_t = 1)]
    pub retries: u32,

    /// Fixed delay between retries, in seconds.
    #[clap(long, default_value_t = 300)]
    pub retry_delay: u64,

    /// HTTP request timeout, in seconds.
    #[clap(long, default_value_t = 30)]
    pub timeout: u64,
}

#[derive(Debug, Parser)]
#[clap(
    name = "apod-etl",
    about = "Fetch NASA's Astronomy Picture of the Day and store it in SQLite"
)]
pub struct ApodCli {
    /// HTTP connection id (or set `APOD_HTTP_CONN_ID` env var).
    #[clap(long, global = true)]
    pub http_conn_id: Option<ConnId>,

    /// Database connection id (or set `APOD_DB_CONN_ID` env var).
    #[clap(long, global = true)]
    pub db_conn_id: Option<ConnId>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the apod_data table if it does not exist
    InitDb,

    /// Run the pipeline once for today's interval
    Run {
        #[clap(flatten)]
        options: RunOptions,

        /// Fetch the picture for this date (YYYY-MM-DD) instead of today's.
        #[clap(long)]
        date: Option<NaiveDate>,

        /// Output the run report as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Run the pipeline daily at midnight UTC until interrupted
    Schedule {
        #[clap(flatten)]
        options: RunOptions,
    },

    /// Show the most recently stored records
    Latest {
        /// Number of rows to show.
        #[clap(long, short = 'n', default_value_t = 1)]
        limit: u32,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
