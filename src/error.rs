//! Error types for the APOD ETL pipeline

use chrono::NaiveDate;
use thiserror::Error;

use crate::pipeline::Step;

pub type Result<T> = std::result::Result<T, ApodError>;

#[derive(Error, Debug)]
pub enum ApodError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid connection URI: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Connection '{conn_id}' not found; set the {env_var} environment variable")]
    MissingConnection { conn_id: String, env_var: String },

    #[error("Connection '{conn_id}' is invalid: {reason}")]
    InvalidConnection { conn_id: String, reason: String },

    #[error("Connection '{conn_id}' has no api_key in its extras")]
    MissingApiKey { conn_id: String },

    #[error("Could not determine the user data directory")]
    NoDataDir,

    #[error("Invalid connection id: {value:?}")]
    InvalidConnId { value: String },

    #[error("APOD API returned a non-object JSON body ({kind})")]
    UnexpectedPayload { kind: &'static str },

    #[error("Step {step} failed: {source}")]
    Step {
        step: Step,
        #[source]
        source: Box<ApodError>,
    },

    #[error("Interval {interval} failed after {attempts} attempt(s): {source}")]
    IntervalFailed {
        interval: NaiveDate,
        attempts: u32,
        #[source]
        source: Box<ApodError>,
    },
}

impl ApodError {
    /// The step that failed, looking through interval and step wrappers.
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            ApodError::Step { step, .. } => Some(*step),
            ApodError::IntervalFailed { source, .. } => source.failed_step(),
            _ => None,
        }
    }
}
