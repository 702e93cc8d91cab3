//! Storage error types for ref-store.

use std::path::PathBuf;

use ref_core::errors::CoreError;
use ref_fix::LibraryError;
use thiserror::Error;

/// Errors from reading or writing refkeep files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document parsed but does not match its schema.
    #[error("{path} entry {index} does not match schema '{schema}': {errors:?}")]
    Schema {
        path: PathBuf,
        index: usize,
        schema: &'static str,
        errors: Vec<String>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

impl From<StoreError> for LibraryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { source, .. } => Self::Io(source),
            StoreError::Json { source, .. } => Self::Json(source),
            StoreError::Core(CoreError::NotFound { id }) => Self::NotFound { id },
            other => Self::Conflict(other.to_string()),
        }
    }
}
