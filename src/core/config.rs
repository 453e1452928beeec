//! Logger configuration
//!
//! `LoggerConfig` can be deserialized from any serde format or read from the
//! environment, then turned into a logger with
//! [`Logger::from_config`](super::Logger::from_config).

use super::{
    error::Result, level::Level, logger::FailurePolicy, output_format::OutputFormat,
    timestamp::TimestampFormat,
};
use serde::{Deserialize, Serialize};

/// Environment variable holding the minimum level
pub const LEVEL_ENV: &str = "LOGZ_LEVEL";

/// Environment variable holding the output format
pub const FORMAT_ENV: &str = "LOGZ_FORMAT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: Level,
    pub format: OutputFormat,
    pub timestamp_format: TimestampFormat,
    pub failure_policy: FailurePolicy,
}

impl LoggerConfig {
    /// Read the configuration from `LOGZ_LEVEL` and `LOGZ_FORMAT`.
    ///
    /// The level is parsed leniently like [`Level::parse`]; an unknown format is
    /// a configuration error. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] over an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(level) = lookup(LEVEL_ENV) {
            config.level = Level::parse(&level);
        }
        if let Some(format) = lookup(FORMAT_ENV) {
            config.format = format.parse()?;
        }
        Ok(config)
    }
}
