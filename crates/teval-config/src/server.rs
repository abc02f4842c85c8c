//! Server configuration.
//!
//! # Environment Variables
//!
//! - `SERVER_ADDR`: Listen address (default: `0.0.0.0:3000`)
//! - `STORAGE_BACKEND`: `postgres` (default) or `memory`
//! - `RUN_MIGRATIONS`: Apply embedded migrations on startup (default: `true`)

use std::env;
use std::str::FromStr;

/// Where records are persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Volatile in-process store. Everything is lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub storage: StorageBackend,
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3000".to_string(),
            storage: StorageBackend::Postgres,
            run_migrations: true,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            addr: env::var("SERVER_ADDR").unwrap_or(defaults.addr),
            storage: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.storage),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.run_migrations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_parse_storage_backend() {
        assert_eq!("memory".parse(), Ok(StorageBackend::Memory));
        assert_eq!(" Postgres ".parse(), Ok(StorageBackend::Postgres));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }
}
