//! Error types for the adventure engines.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, AdventureError>;

/// Errors reported synchronously at the call site.
///
/// Arithmetic overflow on capacities and weights is not detected; callers
/// bound their inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdventureError {
    /// The input cannot be processed by the requested operation.
    #[error("Invalid input for '{operation}': {reason}")]
    InvalidInput {
        /// The operation that rejected the input
        operation: &'static str,
        /// Explanation of why it was rejected
        reason: String,
    },

    /// The engine does not provide the requested operation.
    #[error("Operation '{operation}' is not implemented by this engine")]
    Unimplemented {
        /// The unsupported operation
        operation: &'static str,
    },

    /// An engine configuration value is out of range.
    #[error("Invalid configuration '{parameter}': {reason}")]
    InvalidConfig {
        /// The parameter name
        parameter: &'static str,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// The worker pool could not be started.
    #[error("Failed to build worker pool: {0}")]
    PoolBuild(String),
}

impl AdventureError {
    pub(crate) fn empty_input(operation: &'static str) -> Self {
        Self::InvalidInput {
            operation,
            reason: "sequence must not be empty".into(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for AdventureError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::PoolBuild(err.to_string())
    }
}
