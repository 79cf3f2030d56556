//! Pool configuration.

use crate::constants::{
    DEFAULT_COORDINATOR, DEFAULT_EVENT_LIMIT, DEFAULT_HISTORY_LIMIT, DEFAULT_INBOX_CAPACITY, DEFAULT_MINIMUM_STAKE,
};
use crate::pool::Amount;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required environment variable not set
    #[error("{0} must be set")]
    Missing(&'static str),

    /// Environment variable could not be parsed
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Account allowed to trigger winner selection
    pub coordinator: String,

    /// Smallest accepted stake, in base units (default: 0.01 of a coin)
    pub minimum_stake: Amount,

    /// Resolved rounds kept in memory (default: 64, 0 disables history)
    pub history_limit: usize,

    /// Undrained events kept before the oldest are dropped (default: 256, 0 disables events)
    pub event_limit: usize,

    /// Pool actor inbox size (default: 100)
    pub inbox_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            coordinator: DEFAULT_COORDINATOR.to_string(),
            minimum_stake: DEFAULT_MINIMUM_STAKE,
            history_limit: DEFAULT_HISTORY_LIMIT,
            event_limit: DEFAULT_EVENT_LIMIT,
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `POOL_COORDINATOR`: Coordinator account id
    /// - `POOL_MINIMUM_STAKE`: Minimum stake in base units (default: 10^16)
    /// - `POOL_HISTORY_LIMIT`: Resolved rounds to keep (default: 64)
    /// - `POOL_EVENT_LIMIT`: Undrained events to keep (default: 256)
    /// - `POOL_INBOX_CAPACITY`: Actor inbox size (default: 100)
    ///
    /// # Returns
    ///
    /// * `ConfigResult<PoolConfig>` - Validated configuration from environment
    pub fn from_env() -> ConfigResult<Self> {
        let coordinator = env::var("POOL_COORDINATOR")
            .map_err(|_| ConfigError::Missing("POOL_COORDINATOR"))?;

        let config = Self {
            coordinator,
            minimum_stake: parse_var("POOL_MINIMUM_STAKE", "u128", DEFAULT_MINIMUM_STAKE)?,
            history_limit: parse_var("POOL_HISTORY_LIMIT", "usize", DEFAULT_HISTORY_LIMIT)?,
            event_limit: parse_var("POOL_EVENT_LIMIT", "usize", DEFAULT_EVENT_LIMIT)?,
            inbox_capacity: parse_var("POOL_INBOX_CAPACITY", "usize", DEFAULT_INBOX_CAPACITY)?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.coordinator.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Coordinator must not be empty".to_string(),
            ));
        }

        if self.inbox_capacity == 0 {
            return Err(ConfigError::Validation(
                "Inbox capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    expected: &'static str,
    default: T,
) -> ConfigResult<T> {
    let Ok(value) = env::var(name) else {
        return Ok(default);
    };

    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = [
        "POOL_COORDINATOR",
        "POOL_MINIMUM_STAKE",
        "POOL_HISTORY_LIMIT",
        "POOL_EVENT_LIMIT",
        "POOL_INBOX_CAPACITY",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env tests are serialized with #[serial]
            unsafe { env::remove_var(var) };
        }
    }

    fn set_env(name: &str, value: &str) {
        // SAFETY: env tests are serialized with #[serial]
        unsafe { env::set_var(name, value) };
    }

    #[test]
    fn test_default_is_valid() {
        let config = PoolConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.minimum_stake, 10_000_000_000_000_000);
    }

    #[test]
    fn test_validate_rejects_blank_coordinator() {
        let config = PoolConfig {
            coordinator: "   ".to_string(),
            ..PoolConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_zero_inbox() {
        let config = PoolConfig {
            inbox_capacity: 0,
            ..PoolConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_requires_coordinator() {
        clear_env();
        assert_eq!(
            PoolConfig::from_env(),
            Err(ConfigError::Missing("POOL_COORDINATOR"))
        );
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_env("POOL_COORDINATOR", "manager");

        let config = PoolConfig::from_env().unwrap();

        assert_eq!(config.coordinator, "manager");
        assert_eq!(config.minimum_stake, DEFAULT_MINIMUM_STAKE);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.event_limit, DEFAULT_EVENT_LIMIT);
        assert_eq!(config.inbox_capacity, DEFAULT_INBOX_CAPACITY);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_env("POOL_COORDINATOR", "manager");
        set_env("POOL_MINIMUM_STAKE", "500");
        set_env("POOL_HISTORY_LIMIT", "3");
        set_env("POOL_EVENT_LIMIT", "16");
        set_env("POOL_INBOX_CAPACITY", "8");

        let config = PoolConfig::from_env().unwrap();

        assert_eq!(config.minimum_stake, 500);
        assert_eq!(config.history_limit, 3);
        assert_eq!(config.event_limit, 16);
        assert_eq!(config.inbox_capacity, 8);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_number() {
        clear_env();
        set_env("POOL_COORDINATOR", "manager");
        set_env("POOL_MINIMUM_STAKE", "lots");

        let err = PoolConfig::from_env().unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "POOL_MINIMUM_STAKE",
                expected: "u128",
                value: "lots".to_string(),
            }
        );
        clear_env();
    }
}
