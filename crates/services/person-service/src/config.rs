//! Person service configuration.

use std::env;

use common::{DatabaseConfig, DEFAULT_DATABASE_URL};

/// Person service configuration.
#[derive(Debug, Clone, Default)]
pub struct PersonServiceConfig {
    /// Store connection settings
    pub database: DatabaseConfig,
}

impl PersonServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Service-prefixed keys win over the shared ones; anything missing or
    /// unparsable falls back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();

        let url = lookup("PERSON_SERVICE_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let parsed = |key: &str| lookup(key).and_then(|v| v.parse().ok());

        Self {
            database: DatabaseConfig {
                url,
                max_connections: parsed("PERSON_SERVICE_DB_MAX_CONNECTIONS")
                    .unwrap_or(defaults.max_connections),
                min_connections: parsed("PERSON_SERVICE_DB_MIN_CONNECTIONS")
                    .unwrap_or(defaults.min_connections),
                connect_timeout_secs: lookup("PERSON_SERVICE_DB_CONNECT_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.connect_timeout_secs),
            },
        }
    }
}
