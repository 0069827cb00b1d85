use crate::DEFAULT_LOG_LEVEL_STRING;

use std::ops::Deref;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Deserializer};

/// `LevelFilter` wrapper that tolerates bad input instead of failing the
/// whole config load. Anything unrecognized falls back to `info`.
#[derive(Debug, Clone, Copy)]
pub struct LogLevel(pub LevelFilter);

impl LogLevel {
    fn lenient(value: &str) -> Self {
        let filter = match value.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        };
        LogLevel(filter)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)
            .unwrap_or_else(|_| String::from(DEFAULT_LOG_LEVEL_STRING));
        Ok(LogLevel::lenient(&value))
    }
}

impl FromStr for LogLevel {
    type Err = ();

    // Env overrides come through here; same leniency as deserialization.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogLevel::lenient(s))
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(log_level: LogLevel) -> Self {
        log_level.0
    }
}

impl Deref for LogLevel {
    type Target = LevelFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
