//! Which actions are offered for which finding kind.

use async_trait::async_trait;
use ref_core::entities::{BibliographicRecord, CheckFinding};
use ref_core::enums::FindingKind;
use serde::{Deserialize, Serialize};

use crate::action::{ApplyOutcome, FixActionType};
use crate::library::Library;

/// One selectable remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOption {
    pub label: String,
    pub action: FixActionType,
}

impl From<FixActionType> for FixOption {
    fn from(action: FixActionType) -> Self {
        Self {
            label: action.label().to_string(),
            action,
        }
    }
}

/// Source of remediation options and their application.
#[async_trait]
pub trait FixActionRegistry: Send + Sync {
    /// Options for `finding`, in presentation order. Empty means nothing can
    /// be done about it.
    fn actions_for(&self, finding: &CheckFinding) -> Vec<FixOption>;

    /// Apply `action` to `record` in response to `finding`.
    async fn apply_action(
        &self,
        library: &mut dyn Library,
        record: &BibliographicRecord,
        finding: &CheckFinding,
        action: FixActionType,
    ) -> ApplyOutcome {
        action.apply(library, record, finding).await
    }
}

/// Built-in mapping from finding kind to actions.
///
/// | kind                 | actions                                         |
/// |----------------------|-------------------------------------------------|
/// | `retracted`          | tag retracted, remove, skip                     |
/// | `concern`            | tag concern, skip                               |
/// | `version_changed`    | update to published, skip                       |
/// | `metadata_mismatch`  | update metadata, tag needs-review, remove, skip |
/// | `metadata_outdated`  | update metadata, skip                           |
/// | `source_unavailable` | none                                            |
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFixRegistry;

impl DefaultFixRegistry {
    #[must_use]
    pub const fn actions_for_kind(kind: FindingKind) -> &'static [FixActionType] {
        use FixActionType::{
            Remove, Skip, TagConcern, TagNeedsReview, TagRetracted, UpdateMetadata,
            UpdateToPublished,
        };

        match kind {
            FindingKind::Retracted => &[TagRetracted, Remove, Skip],
            FindingKind::Concern => &[TagConcern, Skip],
            FindingKind::VersionChanged => &[UpdateToPublished, Skip],
            FindingKind::MetadataMismatch => &[UpdateMetadata, TagNeedsReview, Remove, Skip],
            FindingKind::MetadataOutdated => &[UpdateMetadata, Skip],
            FindingKind::SourceUnavailable => &[],
        }
    }
}

#[async_trait]
impl FixActionRegistry for DefaultFixRegistry {
    fn actions_for(&self, finding: &CheckFinding) -> Vec<FixOption> {
        Self::actions_for_kind(finding.kind)
            .iter()
            .copied()
            .map(FixOption::from)
            .collect()
    }
}
