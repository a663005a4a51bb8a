//! Environment-driven server configuration.
//!
//! # Invariants
//! - `STUDENTDASH_DB_PATH` is mandatory; every other key has a default.
//! - Present but unparsable values are errors, never silently defaulted.

use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use studentdash_core::{default_log_dir, default_log_level, RetryPolicy};

pub const DB_PATH_KEY: &str = "STUDENTDASH_DB_PATH";
pub const PORT_KEY: &str = "STUDENTDASH_PORT";
pub const LOG_LEVEL_KEY: &str = "STUDENTDASH_LOG_LEVEL";
pub const LOG_DIR_KEY: &str = "STUDENTDASH_LOG_DIR";
pub const DB_RETRIES_KEY: &str = "STUDENTDASH_DB_RETRIES";
pub const DB_RETRY_INTERVAL_KEY: &str = "STUDENTDASH_DB_RETRY_INTERVAL_MS";

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "environment variable {key} is required"),
            Self::Invalid {
                key,
                value,
                message,
            } => write!(f, "invalid {key} value `{value}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    pub log_level: String,
    pub log_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = var(DB_PATH_KEY)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(DB_PATH_KEY))?;

        let defaults = RetryPolicy::default();
        let interval_ms = parse_or(
            DB_RETRY_INTERVAL_KEY,
            var(DB_RETRY_INTERVAL_KEY),
            defaults.interval.as_millis() as u64,
        )?;

        Ok(Self {
            db_path,
            port: parse_or(PORT_KEY, var(PORT_KEY), DEFAULT_PORT)?,
            log_level: var(LOG_LEVEL_KEY).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var(LOG_DIR_KEY)
                .map(PathBuf::from)
                .unwrap_or_else(default_log_dir),
            retry: RetryPolicy {
                max_attempts: parse_or(DB_RETRIES_KEY, var(DB_RETRIES_KEY), defaults.max_attempts)?,
                interval: Duration::from_millis(interval_ms),
            },
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match raw {
        Some(value) => value.parse().map_err(|err: T::Err| ConfigError::Invalid {
            key,
            message: err.to_string(),
            value,
        }),
        None => {
            info!("event=config_default module=config key={key} value={default}");
            Ok(default)
        }
    }
}
