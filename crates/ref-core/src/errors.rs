//! Cross-cutting error types for refkeep.
//!
//! Domain-specific errors (`LibraryError`, `StoreError`, `ConfigError`, ...)
//! live in their own crates. `anyhow` only appears here as the catch-all and
//! in the `refk` binary where everything converges.

use thiserror::Error;

/// Errors that can be raised by any refkeep crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record lookup returned no result.
    #[error("Record not found: {id}")]
    NotFound { id: String },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
