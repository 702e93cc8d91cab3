//! The library capability the orchestrator mutates through.
//!
//! The orchestrator never touches storage directly: it looks records up,
//! applies [`RecordUpdate`]s, removes records and finally asks for one save,
//! all through [`Library`].

use async_trait::async_trait;
use ref_core::entities::{AuthorName, BibliographicRecord, DateField};

use crate::error::LibraryError;

/// Result of [`Library::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub updated: bool,
}

/// Result of [`Library::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: bool,
}

/// Mutable view of the personal library.
///
/// Implementations see at most one call in flight from a fix run; any
/// locking the backing store needs is its own concern.
#[async_trait]
pub trait Library: Send {
    /// Look a record up by citation key.
    async fn find(&self, id: &str) -> Result<Option<BibliographicRecord>, LibraryError>;

    /// Apply `update` to the record with citation key `id`.
    ///
    /// An unknown id yields `updated: false`, not an error.
    async fn update(
        &mut self,
        id: &str,
        update: RecordUpdate,
    ) -> Result<UpdateOutcome, LibraryError>;

    /// Remove the record with citation key `id`.
    ///
    /// An unknown id yields `removed: false`, not an error.
    async fn remove(&mut self, id: &str) -> Result<RemoveOutcome, LibraryError>;

    /// Persist every change made so far.
    async fn save(&mut self) -> Result<(), LibraryError>;
}

/// A partial record write. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub author: Option<Vec<AuthorName>>,
    pub container_title: Option<String>,
    pub kind: Option<String>,
    pub page: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub issued: Option<DateField>,
    pub doi: Option<String>,
    /// Tags added to `custom.tags` if not already present.
    pub add_tags: Vec<String>,
}

impl RecordUpdate {
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            add_tags: vec![tag.into()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Write into `record`, returning the names of fields whose value changed.
    ///
    /// Field names use the CSL keys (`container-title`, `type`, `DOI`); added
    /// tags are reported as `tags`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Conflict` when tags are requested but
    /// `custom.tags` is not a list; the record is left as it was.
    pub fn apply_to(
        self,
        record: &mut BibliographicRecord,
    ) -> Result<Vec<String>, LibraryError> {
        if !self.add_tags.is_empty() && record.tags_are_malformed() {
            return Err(LibraryError::Conflict("custom.tags is not a list".into()));
        }

        let mut changed = Vec::new();

        set(&mut record.title, self.title, "title", &mut changed);
        set(&mut record.author, self.author, "author", &mut changed);
        set(
            &mut record.container_title,
            self.container_title,
            "container-title",
            &mut changed,
        );
        set(&mut record.kind, self.kind, "type", &mut changed);
        set(&mut record.page, self.page, "page", &mut changed);
        set(&mut record.volume, self.volume, "volume", &mut changed);
        set(&mut record.issue, self.issue, "issue", &mut changed);
        set(&mut record.issued, self.issued, "issued", &mut changed);
        set(&mut record.doi, self.doi, "DOI", &mut changed);

        let mut tagged = false;
        for tag in &self.add_tags {
            tagged |= record
                .add_tag(tag)
                .map_err(|err| LibraryError::Conflict(err.to_string()))?;
        }
        if tagged {
            changed.push("tags".to_string());
        }

        Ok(changed)
    }
}

fn set<T: PartialEq>(
    slot: &mut Option<T>,
    value: Option<T>,
    field: &str,
    changed: &mut Vec<String>,
) {
    if let Some(value) = value {
        if slot.as_ref() != Some(&value) {
            *slot = Some(value);
            changed.push(field.to_string());
        }
    }
}
