//! Fix orchestration error types.

use thiserror::Error;

/// Errors reported by a [`Library`](crate::Library) implementation.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Record not found: {id}")]
    NotFound { id: String },

    #[error("Library I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Library JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested change contradicts the library state (e.g. id collision).
    #[error("Library conflict: {0}")]
    Conflict(String),
}

/// Errors that end a fix run.
///
/// Per-finding failures never surface here; they are counted in
/// `FixInteractionResult::failed` and reported through diagnostics.
#[derive(Debug, Error)]
pub enum FixError {
    #[error("Failed to save library after fixes: {0}")]
    Save(#[source] LibraryError),
}
