//! Data models for the storage layer

use serde::{Deserialize, Serialize};

use crate::apod::ApodRecord;

/// A row of `apod_data`. Every column except `id` is nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredApod {
    pub id: i64,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
    pub media_type: Option<String>,
}

impl StoredApod {
    /// View the row as a record, mapping NULL columns to `""`.
    pub fn to_record(&self) -> ApodRecord {
        ApodRecord {
            title: self.title.clone().unwrap_or_default(),
            explanation: self.explanation.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
            date: self.date.clone().unwrap_or_default(),
            media_type: self.media_type.clone().unwrap_or_default(),
        }
    }
}
