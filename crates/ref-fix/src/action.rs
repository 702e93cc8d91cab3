//! Fix actions and their handlers.
//!
//! Every action kind is a variant of [`FixActionType`] and owns its handler,
//! so adding an action means adding a variant and a match arm.

use std::fmt;

use ref_core::entities::{BibliographicRecord, CheckFinding};
use ref_match::{COMPARED_FIELDS, map_remote_type};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::library::{Library, RecordUpdate};

/// Tag written by [`FixActionType::TagRetracted`].
pub const TAG_RETRACTED: &str = "retracted";
/// Tag written by [`FixActionType::TagConcern`].
pub const TAG_CONCERN: &str = "concern";
/// Tag written by [`FixActionType::TagNeedsReview`].
pub const TAG_NEEDS_REVIEW: &str = "needs-review";

// ---------------------------------------------------------------------------
// FixActionType
// ---------------------------------------------------------------------------

/// A remediation an operator can pick for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixActionType {
    /// Overwrite stale fields with the remote snapshot attached to the finding.
    UpdateMetadata,
    /// Point the record at the published version's DOI.
    UpdateToPublished,
    TagRetracted,
    TagConcern,
    TagNeedsReview,
    Remove,
    /// Leave the record as is.
    Skip,
}

impl FixActionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UpdateMetadata => "update_metadata",
            Self::UpdateToPublished => "update_to_published",
            Self::TagRetracted => "tag_retracted",
            Self::TagConcern => "tag_concern",
            Self::TagNeedsReview => "tag_needs_review",
            Self::Remove => "remove",
            Self::Skip => "skip",
        }
    }

    /// Option text shown to the operator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpdateMetadata => "Update metadata from remote",
            Self::UpdateToPublished => "Update to published version",
            Self::TagRetracted => "Tag as retracted",
            Self::TagConcern => "Tag with expression of concern",
            Self::TagNeedsReview => "Tag for manual review",
            Self::Remove => "Remove from library",
            Self::Skip => "Skip",
        }
    }

    #[must_use]
    pub const fn is_skip(self) -> bool {
        matches!(self, Self::Skip)
    }

    /// Run this action's handler against `record`.
    ///
    /// Never fails: library errors and missing finding details come back as
    /// an outcome with `applied: false` and a message saying why.
    pub async fn apply(
        self,
        library: &mut dyn Library,
        record: &BibliographicRecord,
        finding: &CheckFinding,
    ) -> ApplyOutcome {
        let result = match self {
            Self::UpdateMetadata => update_metadata(library, record, finding).await,
            Self::UpdateToPublished => update_to_published(library, record, finding).await,
            Self::TagRetracted => add_tag(library, record, TAG_RETRACTED).await,
            Self::TagConcern => add_tag(library, record, TAG_CONCERN).await,
            Self::TagNeedsReview => add_tag(library, record, TAG_NEEDS_REVIEW).await,
            Self::Remove => remove(library, record).await,
            Self::Skip => Ok(ApplyOutcome::applied("skipped")),
        };

        result.unwrap_or_else(|err| ApplyOutcome::failed(err.to_string()))
    }
}

impl fmt::Display for FixActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApplyOutcome
// ---------------------------------------------------------------------------

/// What happened when an action was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub applied: bool,
    pub message: String,
    /// The record is no longer in the library.
    pub removed: bool,
}

impl ApplyOutcome {
    #[must_use]
    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            applied: true,
            message: message.into(),
            removed: false,
        }
    }

    #[must_use]
    pub fn removed(message: impl Into<String>) -> Self {
        Self {
            applied: true,
            message: message.into(),
            removed: true,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            applied: false,
            message: message.into(),
            removed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn update_metadata(
    library: &mut dyn Library,
    record: &BibliographicRecord,
    finding: &CheckFinding,
) -> Result<ApplyOutcome, LibraryError> {
    match metadata_update(finding) {
        Ok(update) => write(library, record, update, "metadata updated").await,
        Err(reason) => Ok(ApplyOutcome::failed(reason)),
    }
}

async fn update_to_published(
    library: &mut dyn Library,
    record: &BibliographicRecord,
    finding: &CheckFinding,
) -> Result<ApplyOutcome, LibraryError> {
    let new_doi = finding
        .details
        .as_ref()
        .and_then(|details| details.new_doi.as_deref())
        .map(str::trim)
        .filter(|doi| !doi.is_empty());

    let Some(new_doi) = new_doi else {
        return Ok(ApplyOutcome::failed("finding carries no published DOI"));
    };

    let update = RecordUpdate {
        doi: Some(new_doi.to_string()),
        ..RecordUpdate::default()
    };
    write(library, record, update, &format!("DOI set to {new_doi}")).await
}

async fn add_tag(
    library: &mut dyn Library,
    record: &BibliographicRecord,
    tag: &str,
) -> Result<ApplyOutcome, LibraryError> {
    if record.tags_are_malformed() {
        return Ok(ApplyOutcome::failed("custom.tags is not a list"));
    }
    if record.tags().contains(&tag) {
        return Ok(ApplyOutcome::applied(format!("already tagged '{tag}'")));
    }
    write(library, record, RecordUpdate::tag(tag), &format!("tagged '{tag}'")).await
}

async fn remove(
    library: &mut dyn Library,
    record: &BibliographicRecord,
) -> Result<ApplyOutcome, LibraryError> {
    let outcome = library.remove(&record.id).await?;
    if outcome.removed {
        Ok(ApplyOutcome::removed("removed from library"))
    } else {
        Ok(ApplyOutcome::failed("record is no longer in the library"))
    }
}

async fn write(
    library: &mut dyn Library,
    record: &BibliographicRecord,
    update: RecordUpdate,
    done: &str,
) -> Result<ApplyOutcome, LibraryError> {
    let outcome = library.update(&record.id, update).await?;
    if outcome.updated {
        Ok(ApplyOutcome::applied(done))
    } else {
        Ok(ApplyOutcome::failed("record is no longer in the library"))
    }
}

/// Build the write for an `update_metadata` action.
///
/// Covers the finding's changed fields (all compared fields when the checker
/// listed none). Remote values that are absent or blank are left out, so
/// local data is never cleared.
///
/// # Errors
///
/// Returns a reason when the finding has no remote snapshot or the snapshot
/// has nothing to write.
pub fn metadata_update(finding: &CheckFinding) -> Result<RecordUpdate, String> {
    let details = finding.details.as_ref();
    let Some(remote) = details.and_then(|details| details.remote.as_ref()) else {
        return Err("finding carries no remote metadata".to_string());
    };

    let mut fields: Vec<&str> = details
        .map(|details| details.changed_fields.iter().map(String::as_str).collect())
        .unwrap_or_default();
    if fields.is_empty() {
        fields = details
            .map(|details| details.field_diffs.iter().map(|d| d.field.as_str()).collect())
            .unwrap_or_default();
    }
    if fields.is_empty() {
        fields = COMPARED_FIELDS.to_vec();
    }

    let mut update = RecordUpdate::default();
    for field in fields {
        match field {
            "title" => update.title = text(remote.title()),
            "author" => {
                update.author = remote.author.clone().filter(|authors| !authors.is_empty());
            }
            "container-title" => update.container_title = text(remote.container_title()),
            "type" => update.kind = text(remote.kind.as_deref().map(map_remote_type)),
            "page" => update.page = text(remote.page.as_deref()),
            "volume" => update.volume = text(remote.volume.as_deref()),
            "issue" => update.issue = text(remote.issue.as_deref()),
            "issued" => {
                update.issued = remote
                    .issued
                    .clone()
                    .filter(|issued| issued.first_parts().is_some());
            }
            other => tracing::debug!(field = other, "no metadata update for field"),
        }
    }

    if update.is_empty() {
        return Err("remote metadata has no values for the changed fields".to_string());
    }
    Ok(update)
}

fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
