//! Engine adapter error types

use thiserror::Error;

/// Failures reported by a search engine adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Could not reach the engine
    #[error("Connection error: {0}")]
    Connection(String),

    /// The engine rejected or failed a query
    #[error("Query error: {0}")]
    Query(String),

    /// The operation exceeded the timeout the adapter was given
    #[error("Timeout error: operation timed out after {duration_ms}ms")]
    Timeout {
        /// Timeout that was exceeded
        duration_ms: u64,
    },

    /// The collection or engine is not available for this operation
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// Any other backend failure
    #[error("Engine backend error: {0}")]
    Backend(String),
}

impl EngineError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a query error
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Create a generic backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Whether a caller-side retry could plausibly succeed
    ///
    /// The facade itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

/// Result type for engine adapter operations
pub type EngineResult<T> = Result<T, EngineError>;
