//! Record types for the APOD pipeline.

use serde::{Deserialize, Serialize};

/// The five APOD fields persisted for each run.
///
/// All fields are plain text. `date` is kept exactly as the API returned it
/// (normally `YYYY-MM-DD`) and is not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub title: String,
    pub explanation: String,
    pub url: String,
    pub date: String,
    pub media_type: String,
}
