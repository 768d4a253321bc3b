//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations of the pure algorithms.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("index out of range: {index} (valid range 0..={len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("operation timed out after {attempts} attempts")]
    OperationTimedOut {
        attempts: usize,
        /// Diagnostic detail of every failed attempt, in order
        failures: Vec<String>,
    },

    #[error("operation failed on attempt {attempt}: {message}")]
    OperationFailed { attempt: usize, message: String },

    #[error("invalid tree definition at line {line}: {reason}")]
    InvalidTreeSpec { line: usize, reason: String },

    #[error("cycle detected in tree definition: {0}")]
    CycleDetected(String),
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
