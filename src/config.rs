use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),
    #[error("STORAGE_BACKEND must be 'postgres' or 'memory', got '{0}'")]
    UnknownBackend(String),
}

/// Where orders are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
}

impl Config {
    /// Reads `HOST`, `PORT`, `STORAGE_BACKEND` and `DATABASE_URL` from the
    /// process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.to_ascii_lowercase().as_str() {
            "postgres" => StorageBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => StorageBackend::Memory,
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Config {
            host,
            port,
            storage,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_postgres_on_port_8080() {
        let config = parse(&[("DATABASE_URL", "postgres://localhost/orders")]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/orders".to_string()
            }
        );
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_eq!(parse(&[]), Err(ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_backend_needs_no_database_url() {
        let config = parse(&[
            ("STORAGE_BACKEND", "memory"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
        ])
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn rejects_invalid_port() {
        assert_eq!(
            parse(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")]),
            Err(ConfigError::InvalidPort("eighty".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_backend() {
        assert_eq!(
            parse(&[("STORAGE_BACKEND", "redis")]),
            Err(ConfigError::UnknownBackend("redis".to_string()))
        );
    }
}
