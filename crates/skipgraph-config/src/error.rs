//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::ReservedEngine;

/// Errors raised while loading or validating graph configuration
///
/// Every variant is fatal: a facade is never built from a configuration
/// that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required key was absent from the configuration source
    #[error("Missing configuration key: {key}")]
    MissingKey {
        /// Name of the absent key
        key: String,
    },

    /// A key was present but its value is unusable
    #[error("Invalid value for {field}: {value}")]
    InvalidValue {
        /// Field that failed validation
        field: String,
        /// Description of the offending value
        value: String,
    },

    /// The engine name matches no known backend
    #[error("Unsupported search engine '{0}': only Solr or Elastic are currently supported")]
    UnsupportedEngine(String),

    /// The engine name is reserved for a backend that has no binding yet
    #[error("Search engine {0} is not ready yet")]
    EngineNotReady(ReservedEngine),

    /// The configuration text could not be parsed
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Source format (`toml` or `json`)
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// The configuration file could not be read
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create a missing key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the error came from engine selection rather than the shape of the config
    pub fn is_engine_selection(&self) -> bool {
        matches!(self, Self::UnsupportedEngine(_) | Self::EngineNotReady(_))
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
