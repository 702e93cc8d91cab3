//! JSONL mutation trail.
//!
//! Appends one [`TrailEntry`] per committed mutation with
//! `serde_jsonlines::append_json_lines`, so earlier lines are never rewritten.

use std::path::{Path, PathBuf};

use ref_core::trail::TrailEntry;

use crate::error::StoreError;

/// Append-only audit log of library mutations.
#[derive(Debug, Clone)]
pub struct MutationTrail {
    path: PathBuf,
}

impl MutationTrail {
    /// Trail at `path`. Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        Ok(Self { path })
    }

    /// Append entries in order. Appending nothing leaves the file untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file write fails.
    pub fn append(&self, entries: &[TrailEntry]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }
        serde_jsonlines::append_json_lines(&self.path, entries)
            .map_err(|e| StoreError::io(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), count = entries.len(), "trail appended");
        Ok(())
    }

    /// Every entry written so far. A missing file is an empty trail.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` on read failure or a malformed line.
    pub fn read(&self) -> Result<Vec<TrailEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::io(&self.path, e))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
