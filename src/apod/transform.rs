//! Mapping from the raw APOD JSON body to an [`ApodRecord`].

use serde_json::{Map, Value};

use super::types::ApodRecord;

/// Extract the five APOD fields, defaulting any absent key to `""`.
///
/// `null` also maps to `""`; any other non-string value is kept as its
/// compact JSON text.
pub fn transform(body: &Map<String, Value>) -> ApodRecord {
    ApodRecord {
        title: field(body, "title"),
        explanation: field(body, "explanation"),
        url: field(body, "url"),
        date: field(body, "date"),
        media_type: field(body, "media_type"),
    }
}

fn field(body: &Map<String, Value>, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
