//! CSL-JSON file-backed library.

use std::collections::HashSet;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ref_core::entities::BibliographicRecord;
use ref_core::enums::TrailOp;
use ref_core::errors::CoreError;
use ref_core::trail::TrailEntry;
use ref_fix::{Library, LibraryError, RecordUpdate, RemoveOutcome, UpdateOutcome};
use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::trail::MutationTrail;

/// A library held in memory and persisted as one CSL-JSON array.
///
/// Mutations stay in memory until [`JsonLibrary::persist`] (or
/// [`Library::save`]) writes the whole file atomically. Trail entries for
/// those mutations are appended only after the file write succeeds.
#[derive(Debug)]
pub struct JsonLibrary {
    path: PathBuf,
    records: Vec<BibliographicRecord>,
    trail: Option<MutationTrail>,
    pending: Vec<TrailEntry>,
}

impl JsonLibrary {
    /// Load the library at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` / `StoreError::Json` if the file cannot be
    /// read or parsed, and `StoreError::Core` if two records share an id.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let file = std::fs::File::open(&path).map_err(|e| StoreError::io(&path, e))?;
        let records: Vec<BibliographicRecord> =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::json(&path, e))?;

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate citation key '{}' in {}",
                    record.id,
                    path.display()
                ))
                .into());
            }
        }

        tracing::debug!(path = %path.display(), records = records.len(), "library loaded");
        Ok(Self {
            path,
            records,
            trail: None,
            pending: Vec::new(),
        })
    }

    /// Library that will be written to `path` on first save.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            trail: None,
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_trail(mut self, trail: MutationTrail) -> Self {
        self.trail = Some(trail);
        self
    }

    #[must_use]
    pub fn records(&self) -> &[BibliographicRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&BibliographicRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Record by citation key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown id.
    pub fn require(&self, id: &str) -> Result<&BibliographicRecord, CoreError> {
        self.get(id).ok_or_else(|| CoreError::NotFound { id: id.to_string() })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether mutations are waiting to be saved.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Write all records atomically, then flush pending trail entries.
    ///
    /// A trail append that fails after the library file is written does not
    /// fail the save: it is logged and the entries stay pending for the next
    /// save.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` / `StoreError::Json` if the write fails; the
    /// previous file is left intact and pending trail entries are kept.
    pub fn persist(&mut self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, &self.records)
            .map_err(|e| StoreError::json(&self.path, e))?;
        tmp.write_all(b"\n")
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), records = self.records.len(), "library saved");

        if let Some(trail) = &self.trail {
            if let Err(err) = trail.append(&self.pending) {
                tracing::warn!(
                    path = %trail.path().display(),
                    pending = self.pending.len(),
                    error = %err,
                    "trail append failed; entries kept for the next save"
                );
                return Ok(());
            }
        }
        self.pending.clear();
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

#[async_trait]
impl Library for JsonLibrary {
    async fn find(&self, id: &str) -> Result<Option<BibliographicRecord>, LibraryError> {
        Ok(self.get(id).cloned())
    }

    async fn update(
        &mut self,
        id: &str,
        update: RecordUpdate,
    ) -> Result<UpdateOutcome, LibraryError> {
        let Some(index) = self.position(id) else {
            return Ok(UpdateOutcome { updated: false });
        };

        let record = &mut self.records[index];
        let fields = update.apply_to(record)?;
        if !fields.is_empty() {
            tracing::debug!(%id, ?fields, "record updated");
            self.pending.push(
                TrailEntry::new(TrailOp::Update, id, record.uuid().map(str::to_string))
                    .with_fields(fields),
            );
        }
        Ok(UpdateOutcome { updated: true })
    }

    async fn remove(&mut self, id: &str) -> Result<RemoveOutcome, LibraryError> {
        let Some(index) = self.position(id) else {
            return Ok(RemoveOutcome { removed: false });
        };

        let record = self.records.remove(index);
        tracing::debug!(%id, "record removed");
        self.pending.push(TrailEntry::new(
            TrailOp::Remove,
            id,
            record.uuid().map(str::to_string),
        ));
        Ok(RemoveOutcome { removed: true })
    }

    async fn save(&mut self) -> Result<(), LibraryError> {
        self.persist().map_err(LibraryError::from)
    }
}
