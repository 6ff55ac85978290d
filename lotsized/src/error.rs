//! Daemon error types.

use lotsize_domain::DomainError;
use lotsize_engine::PlanError;
use thiserror::Error;

/// Daemon-level errors.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Trade plan error
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Inputs failed validation
    #[error("Input error: {0}")]
    InvalidInput(String),

    /// Pair not in the reference table
    #[error("Unknown currency pair: {0}")]
    UnknownPair(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type for daemon operations.
pub type DaemonResult<T> = Result<T, DaemonError>;
