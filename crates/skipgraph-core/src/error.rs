//! Error types for record generation and the graph facade

use skipgraph_config::ConfigError;
use thiserror::Error;

use crate::engine::EngineError;

/// Errors raised while turning groups and labels into records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A group or label lacks an attribute every record needs
    #[error("{entity} '{key}' is missing required field '{field}'")]
    MissingField {
        /// `group` or `label`
        entity: &'static str,
        /// The absent attribute
        field: &'static str,
        /// Key of the group being processed, for context
        key: String,
    },

    /// A content type string that is neither `concept` nor `predicate`
    #[error("Unknown content type '{0}': expected 'concept' or 'predicate'")]
    UnknownContentType(String),
}

impl RecordError {
    /// Create a missing field error
    pub fn missing_field(entity: &'static str, field: &'static str, key: impl Into<String>) -> Self {
        Self::MissingField {
            entity,
            field,
            key: key.into(),
        }
    }
}

/// Errors surfaced by [`crate::GraphQuery`]
///
/// Configuration, record and engine errors are wrapped transparently so the
/// original error can be recovered by matching on the variant.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Construction-time configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Record generation failed before anything was sent to the engine
    #[error(transparent)]
    Record(#[from] RecordError),

    /// The engine adapter failed; passed through unchanged
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A query parameter failed validation before dispatch
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument {
        /// Parameter name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl GraphError {
    /// Create an invalid argument error
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// The engine error, if this failure came from the adapter
    pub fn as_engine_error(&self) -> Option<&EngineError> {
        match self {
            Self::Engine(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for facade operations
pub type GraphResult<T> = Result<T, GraphError>;
