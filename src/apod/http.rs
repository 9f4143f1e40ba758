use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::connections::Connection;
use crate::error::{ApodError, Result};

/// Path of the APOD endpoint relative to the connection's base URL.
pub const APOD_ENDPOINT: &str = "planetary/apod";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one APOD connection.
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApodClient {
    /// Build a client from an HTTP connection carrying an `api_key` extra.
    pub fn from_connection(conn: &Connection, timeout: Duration) -> Result<Self> {
        let api_key = conn
            .extra_str("api_key")
            .ok_or_else(|| ApodError::MissingApiKey {
                conn_id: conn.conn_id.clone(),
            })?;
        Self::new(conn.base_url()?, api_key, timeout)
    }

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers()?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the APOD record, for `date` or the API's current day.
    ///
    /// Non-2xx statuses and undecodable bodies are errors; so is a JSON body
    /// that is not an object.
    pub async fn fetch_apod(&self, date: Option<NaiveDate>) -> Result<Map<String, Value>> {
        let url = format!("{}/{APOD_ENDPOINT}", self.base_url);
        let mut params = vec![("api_key", self.api_key.clone())];
        if let Some(date) = date {
            params.push(("date", date.format("%Y-%m-%d").to_string()));
        }

        debug!(%url, ?date, "requesting APOD");
        let res = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;
        let status = res.status();
        let body = res.json::<Value>().await?;
        info!(%status, "APOD response received");

        match body {
            Value::Object(map) => Ok(map),
            other => Err(ApodError::UnexpectedPayload {
                kind: json_kind(&other),
            }),
        }
    }
}

fn default_headers() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("apod-etl/{}", env!("CARGO_PKG_VERSION")))?,
    );
    Ok(h)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
