//! Command implementations for the APOD ETL CLI

pub mod common;
pub mod init_db;
pub mod latest;
pub mod run;
pub mod schedule;

use crate::{cli::types::ids::ConnId, Result};

/// Pick a connection id from the CLI flag, then `env_var`, then `default`.
pub fn resolve_conn_id(conn_id: Option<ConnId>, env_var: &str, default: &str) -> Result<ConnId> {
    match conn_id {
        Some(id) => Ok(id),
        None => match std::env::var(env_var) {
            Ok(value) => value.parse(),
            Err(_) => ConnId::new(default),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_conn_id_prefers_flag() {
        let flag = ConnId::new("from_flag").unwrap();
        let id = resolve_conn_id(Some(flag.clone()), "APOD_TEST_UNSET_CONN_ID_1", "fallback").unwrap();
        assert_eq!(id, flag);
    }

    #[test]
    fn test_resolve_conn_id_env_then_default() {
        std::env::set_var("APOD_TEST_CONN_ID_2", "from_env");
        let id = resolve_conn_id(None, "APOD_TEST_CONN_ID_2", "fallback").unwrap();
        assert_eq!(id.as_str(), "from_env");
        std::env::remove_var("APOD_TEST_CONN_ID_2");

        let id = resolve_conn_id(None, "APOD_TEST_CONN_ID_2", "fallback").unwrap();
        assert_eq!(id.as_str(), "fallback");
    }

    #[test]
    fn test_resolve_conn_id_rejects_invalid_env_value() {
        std::env::set_var("APOD_TEST_CONN_ID_3", "not valid");
        let result = resolve_conn_id(None, "APOD_TEST_CONN_ID_3", "fallback");
        std::env::remove_var("APOD_TEST_CONN_ID_3");
        assert!(matches!(result, Err(crate::ApodError::InvalidConnId { .. })));
    }

    #[test]
    fn test_default_conn_ids_map_to_registry_vars() {
        let http = resolve_conn_id(None, "APOD_TEST_UNSET_CONN_ID_4", crate::DEFAULT_HTTP_CONN_ID)
            .unwrap();
        let db = resolve_conn_id(None, "APOD_TEST_UNSET_CONN_ID_5", crate::DEFAULT_DB_CONN_ID)
            .unwrap();
        assert_eq!(http.env_var(), "APOD_CONN_NASA_API");
        assert_eq!(db.env_var(), "APOD_CONN_APOD_DB");
    }
}
