//! Price API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                   | Default        |
//! |----------------------------|----------------|
//! | `PRICE_API_PORT`           | `8080`         |
//! | `PRICE_API_BIND`           | `0.0.0.0`      |
//! | `PRICE_DB_PATH`            | `./prices.db`  |
//! | `PRICE_DB_MAX_CONNECTIONS` | `5`            |
//! | `RUST_LOG`                 | `info,price_api=debug,pricing_core=debug,sqlx=warn` |

use std::env;
use std::path::PathBuf;

use pricing_db::DbConfig;

const DEFAULT_LOG_FILTER: &str = "info,price_api=debug,pricing_core=debug,sqlx=warn";

/// Price API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP port
    pub port: u16,

    /// Bind address
    pub bind_addr: String,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub max_connections: u32,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            port: lookup("PRICE_API_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PRICE_API_PORT".to_string()))?,

            bind_addr: lookup("PRICE_API_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),

            database_path: lookup("PRICE_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./prices.db")),

            max_connections: lookup("PRICE_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PRICE_DB_MAX_CONNECTIONS".to_string()))?,

            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "PRICE_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("PRICE_DB_PATH".to_string()));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.database_path, PathBuf::from("./prices.db"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_overrides() {
        let config = load_from(&[
            ("PRICE_API_PORT", "9090"),
            ("PRICE_API_BIND", "127.0.0.1"),
            ("PRICE_DB_PATH", "/var/lib/prices.db"),
            ("PRICE_DB_MAX_CONNECTIONS", "12"),
            ("RUST_LOG", "warn"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(config.db_config().max_connections, 12);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_invalid_values() {
        let err = load_from(&[("PRICE_API_PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PRICE_API_PORT");

        let err = load_from(&[("PRICE_DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PRICE_DB_MAX_CONNECTIONS");

        assert!(load_from(&[("PRICE_API_PORT", "70000")]).is_err());
    }
}
