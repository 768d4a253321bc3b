//! Bounded retry of fallible operations.

use std::fmt::Display;

use tracing::{debug, warn};

use crate::domain::error::{DomainError, DomainResult};

/// Total number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Invokes an operation until it succeeds or the retry budget is spent.
///
/// Attempts follow each other immediately, there is no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryInvoker {
    max_attempts: usize,
}

impl Default for RetryInvoker {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryInvoker {
    pub fn new(max_attempts: usize) -> DomainResult<Self> {
        if max_attempts == 0 {
            return Err(DomainError::invalid_argument(
                "max_attempts must be at least 1",
            ));
        }
        Ok(Self { max_attempts })
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Retry on every failure.
    ///
    /// # Errors
    /// `OperationTimedOut` carrying the diagnostics of every attempt when all
    /// attempts fail.
    pub fn invoke<T, E, F>(&self, op: F) -> DomainResult<T>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        self.invoke_if(op, |_| true)
    }

    /// Retry only failures accepted by `is_retryable`.
    ///
    /// # Errors
    /// `OperationFailed` on the first failure `is_retryable` rejects,
    /// `OperationTimedOut` when the budget is spent.
    pub fn invoke_if<T, E, F, P>(&self, mut op: F, is_retryable: P) -> DomainResult<T>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let mut failures = Vec::with_capacity(self.max_attempts);

        for attempt in 1..=self.max_attempts {
            match op() {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(e) if !is_retryable(&e) => {
                    return Err(DomainError::OperationFailed {
                        attempt,
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!(attempt, max_attempts = self.max_attempts, error = %e, "attempt failed");
                    failures.push(e.to_string());
                }
            }
        }

        Err(DomainError::OperationTimedOut {
            attempts: self.max_attempts,
            failures,
        })
    }
}

/// Invoke `op` with the default retry budget.
pub fn invoke_with_retry<T, E, F>(op: F) -> DomainResult<T>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    RetryInvoker::default().invoke(op)
}
