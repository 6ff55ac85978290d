//! Engine error types.

use lotsize_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while assembling a trade plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// One or more inputs violated their bounds
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pair is not in the reference table
    #[error("Unknown currency pair: {0}")]
    UnknownPair(String),

    /// A calculation step could not produce a value
    #[error("Unable to calculate {0}")]
    Uncomputable(&'static str),

    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Result type for trade plan operations.
pub type PlanResult<T> = Result<T, PlanError>;
