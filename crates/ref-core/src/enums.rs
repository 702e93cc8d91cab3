//! Closed enums for check findings, classifications and duplicate evidence.
//!
//! Finding kinds and statuses serialize as `snake_case`, duplicate evidence
//! types keep the hyphenated wire names used by the checker output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FindingKind
// ---------------------------------------------------------------------------

/// Kind of anomaly the checker detected for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// The work has been retracted.
    Retracted,
    /// An expression of concern was published against the work.
    Concern,
    /// A preprint now has a published version.
    VersionChanged,
    /// Remote metadata no longer looks like the same work.
    MetadataMismatch,
    /// Same work, but some local fields are stale.
    MetadataOutdated,
    /// The remote source could not be consulted.
    SourceUnavailable,
}

impl FindingKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Retracted => "retracted",
            Self::Concern => "concern",
            Self::VersionChanged => "version_changed",
            Self::MetadataMismatch => "metadata_mismatch",
            Self::MetadataOutdated => "metadata_outdated",
            Self::SourceUnavailable => "source_unavailable",
        }
    }

    /// Human-readable label shown when the finding is presented to an operator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Retracted => "Retracted",
            Self::Concern => "Expression of concern",
            Self::VersionChanged => "Published version available",
            Self::MetadataMismatch => "Metadata mismatch",
            Self::MetadataOutdated => "Metadata outdated",
            Self::SourceUnavailable => "Source unavailable",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CheckStatus
// ---------------------------------------------------------------------------

/// Outcome of checking one record.
///
/// `warning` is expected to carry at least one finding; `ok` and `skipped`
/// results are never expanded into findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Ok,
    Warning,
    Skipped,
}

impl CheckStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Three-way outcome of comparing local metadata with a remote snapshot.
///
/// ```text
/// no diffs                          → no_change
/// diffs, title & authors similar    → metadata_outdated
/// diffs, title or authors differ    → metadata_mismatch
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    NoChange,
    MetadataOutdated,
    MetadataMismatch,
}

impl Classification {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoChange => "no_change",
            Self::MetadataOutdated => "metadata_outdated",
            Self::MetadataMismatch => "metadata_mismatch",
        }
    }

    /// The finding kind a checker reports for this classification, if any.
    #[must_use]
    pub const fn finding_kind(self) -> Option<FindingKind> {
        match self {
            Self::NoChange => None,
            Self::MetadataOutdated => Some(FindingKind::MetadataOutdated),
            Self::MetadataMismatch => Some(FindingKind::MetadataMismatch),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DuplicateType
// ---------------------------------------------------------------------------

/// Evidence that made a candidate a duplicate of an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DuplicateType {
    #[serde(rename = "doi")]
    Doi,
    #[serde(rename = "pmid")]
    Pmid,
    #[serde(rename = "title-author-year")]
    TitleAuthorYear,
}

impl DuplicateType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Doi => "doi",
            Self::Pmid => "pmid",
            Self::TitleAuthorYear => "title-author-year",
        }
    }
}

impl fmt::Display for DuplicateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrailOp
// ---------------------------------------------------------------------------

/// Library mutation recorded in the JSONL trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    Update,
    Remove,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
