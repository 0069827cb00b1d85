use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("[{category}] {message} {location}")]
    Generic {
        category: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    fn categorized(category: &'static str, message: String) -> Self {
        ConfigError::Generic {
            category,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Validation failure in the `[server]` or `[websocket]` tables.
    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::categorized("Config", message.into())
    }

    /// Validation failure in the `[logging]` table.
    #[track_caller]
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::categorized("Logging", message.into())
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
