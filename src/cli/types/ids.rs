//! Identifier types for the connection registry.

use crate::error::{ApodError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix of the environment variables holding registry entries.
pub const CONN_ENV_PREFIX: &str = "APOD_CONN_";

/// Type-safe wrapper for connection ids in the connection registry.
///
/// Ids are limited to ASCII alphanumerics, `_` and `-` so that every id maps
/// onto a valid environment variable name.
///
/// # Examples
///
/// ```rust
/// use apod_etl::ConnId;
///
/// let conn_id: ConnId = "nasa-api".parse().unwrap();
/// assert_eq!(conn_id.as_str(), "nasa-api");
/// assert_eq!(conn_id.env_var(), "APOD_CONN_NASA_API");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnId(String);

impl ConnId {
    /// Create a new ConnId, validating its characters.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ApodError::InvalidConnId { value: id });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the environment variable that holds this connection.
    pub fn env_var(&self) -> String {
        format!(
            "{CONN_ENV_PREFIX}{}",
            self.0.to_ascii_uppercase().replace('-', "_")
        )
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConnId {
    type Err = ApodError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
