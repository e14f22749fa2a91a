//! Sanity checks on a loaded [`Config`].

use crate::config::Config;
use crate::error::ConfigError;

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.max_connections == 0 {
        return Err(ConfigError::InvalidVar {
            var: "DB_MAX_CONNECTIONS",
            value: "0".into(),
        });
    }
    if config.acquire_timeout.is_zero() {
        return Err(ConfigError::InvalidVar {
            var: "DB_ACQUIRE_TIMEOUT_SECS",
            value: "0".into(),
        });
    }
    if !config.database_url.starts_with("postgres://") && !config.database_url.starts_with("postgresql://") {
        return Err(ConfigError::InvalidVar {
            var: "DATABASE_URL",
            value: config.database_url.clone(),
        });
    }
    Ok(())
}
