//! Service configuration
//!
//! Store settings live in [`common::database::DatabaseConfig`]; everything
//! else the service needs is read here with the `config` crate, from
//! defaults overridden by environment variables.

use std::time::Duration;

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// `OMDB_API_KEY`
    pub omdb_api_key: String,
    /// `OMDB_BASE_URL`
    pub omdb_base_url: String,
    /// `OMDB_TIMEOUT_SECS`
    pub omdb_timeout_secs: u64,
    /// `BIND_ADDRESS`
    pub bind_address: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("omdb_api_key", "")?
            .set_default("omdb_base_url", omdb::DEFAULT_BASE_URL)?
            .set_default("omdb_timeout_secs", 10)?
            .set_default("bind_address", "0.0.0.0:5002")?
            .add_source(Environment::default())
            .build()?
            .try_deserialize()
    }

    pub fn omdb_timeout(&self) -> Duration {
        Duration::from_secs(self.omdb_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "OMDB_API_KEY",
        "OMDB_BASE_URL",
        "OMDB_TIMEOUT_SECS",
        "BIND_ADDRESS",
    ];

    fn clear_vars() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_vars();

        let config = AppConfig::load().unwrap();
        assert_eq!(config.omdb_api_key, "");
        assert_eq!(config.omdb_base_url, omdb::DEFAULT_BASE_URL);
        assert_eq!(config.omdb_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_address, "0.0.0.0:5002");
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        unsafe {
            std::env::set_var("OMDB_API_KEY", "abc123");
            std::env::set_var("OMDB_TIMEOUT_SECS", "3");
            std::env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
        }

        let config = AppConfig::load().unwrap();
        assert_eq!(config.omdb_api_key, "abc123");
        assert_eq!(config.omdb_timeout_secs, 3);
        assert_eq!(config.bind_address, "127.0.0.1:8080");

        clear_vars();
    }
}
