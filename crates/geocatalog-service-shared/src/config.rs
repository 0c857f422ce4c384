//! Service configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `GEOCATALOG_SQLITE_PATH`: hierarchy database (default: `geocatalog.db`)
//! - `GEOCATALOG_DOCUMENTS_PATH`: place documents database
//!   (default: `geocatalog_documents.db`)
//! - `SERVICE_PORT`: HTTP port (default: 8000)

use std::path::PathBuf;

use geocatalog_lib::paths::{DOCUMENTS_FILENAME, SQLITE_FILENAME};
use geocatalog_lib::StorePaths;

/// Port the service listens on when `SERVICE_PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub store_paths: StorePaths,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_paths: StorePaths::new(SQLITE_FILENAME, DOCUMENTS_FILENAME),
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let sqlite = lookup("GEOCATALOG_SQLITE_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_paths.sqlite);
        let documents = lookup("GEOCATALOG_DOCUMENTS_PATH")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_paths.documents);
        let port = lookup("SERVICE_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self {
            store_paths: StorePaths::new(sqlite, documents),
            port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 8000);
        assert_eq!(config.store_paths.sqlite, PathBuf::from("geocatalog.db"));
    }

    #[test]
    fn test_reads_paths_and_port() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("GEOCATALOG_SQLITE_PATH", "/data/h.db"),
            ("GEOCATALOG_DOCUMENTS_PATH", "/data/d.db"),
            ("SERVICE_PORT", "9001"),
        ]));
        assert_eq!(config.store_paths.sqlite, PathBuf::from("/data/h.db"));
        assert_eq!(config.store_paths.documents, PathBuf::from("/data/d.db"));
        assert_eq!(config.port, 9001);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = ServiceConfig::from_lookup(lookup_from(&[("SERVICE_PORT", "http")]));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
