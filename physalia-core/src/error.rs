//! Structured error types for the Physalia ecosystem.

use thiserror::Error;

/// Unified error type for all Physalia operations.
#[derive(Debug, Error)]
pub enum PhysaliaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A data-structure invariant was violated (a bug, not a user error)
    #[error("internal invariant violated: {0}")]
    Internal(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the Physalia ecosystem.
pub type Result<T> = std::result::Result<T, PhysaliaError>;
