//! Field-level comparison of a local record against a remote snapshot.
//!
//! Comparison runs in two tiers:
//! 1. Mechanical diff over a fixed, ordered field set, each field reduced to
//!    a comparable string on both sides.
//! 2. If anything differs, an identity gate on the raw title and author
//!    inputs decides between `metadata_outdated` (same work, stale fields)
//!    and `metadata_mismatch` (possibly a different work).

use ref_core::entities::{AuthorName, BibliographicRecord, DateField, RemoteMetadata};
use ref_core::enums::Classification;
use ref_core::responses::{FieldDiff, MetadataComparisonResult};

use crate::similarity::SimilarityThresholds;
use crate::vocabulary::map_remote_type;

/// Fields compared, in diff order.
pub const COMPARED_FIELDS: [&str; 8] = [
    "title",
    "author",
    "container-title",
    "type",
    "page",
    "volume",
    "issue",
    "issued",
];

/// Compares local records with remote metadata using configured thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataComparator {
    thresholds: SimilarityThresholds,
}

impl MetadataComparator {
    #[must_use]
    pub const fn new(thresholds: SimilarityThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &SimilarityThresholds {
        &self.thresholds
    }

    /// Diff and classify `local` against `remote`.
    #[must_use]
    pub fn compare(
        &self,
        local: &BibliographicRecord,
        remote: &RemoteMetadata,
    ) -> MetadataComparisonResult {
        let field_diffs: Vec<FieldDiff> = comparable_values(local, remote)
            .into_iter()
            .zip(COMPARED_FIELDS)
            .filter(|((local, remote), _)| local != remote)
            .map(|((local, remote), field)| FieldDiff {
                field: field.to_string(),
                local,
                remote,
            })
            .collect();

        if field_diffs.is_empty() {
            tracing::debug!(id = %local.id, "metadata unchanged");
            return MetadataComparisonResult::no_change();
        }

        let title_similar = self
            .thresholds
            .is_title_similar(local.title.as_deref(), remote.title());
        let author_similar = self
            .thresholds
            .is_author_similar(local.author.as_deref(), remote.author.as_deref());

        let classification = if title_similar && author_similar {
            Classification::MetadataOutdated
        } else {
            Classification::MetadataMismatch
        };

        let changed_fields: Vec<String> = field_diffs.iter().map(|d| d.field.clone()).collect();
        tracing::debug!(
            id = %local.id,
            %classification,
            title_similar,
            author_similar,
            changed = ?changed_fields,
            "metadata compared"
        );

        MetadataComparisonResult {
            classification,
            changed_fields,
            field_diffs,
        }
    }
}

/// [`MetadataComparator::compare`] with default thresholds.
#[must_use]
pub fn compare_metadata(
    local: &BibliographicRecord,
    remote: &RemoteMetadata,
) -> MetadataComparisonResult {
    MetadataComparator::default().compare(local, remote)
}

/// `"Family, Given; Family, Given"` in list order; `None` for an absent or
/// empty list.
#[must_use]
pub fn format_authors(authors: Option<&[AuthorName]>) -> Option<String> {
    let authors = authors.filter(|list| !list.is_empty())?;
    Some(
        authors
            .iter()
            .map(AuthorName::display_name)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

type ComparablePair = (Option<String>, Option<String>);

/// Comparable local/remote values, aligned with [`COMPARED_FIELDS`].
fn comparable_values(
    local: &BibliographicRecord,
    remote: &RemoteMetadata,
) -> [ComparablePair; 8] {
    [
        (text(local.title.as_deref()), text(remote.title())),
        (
            format_authors(local.author.as_deref()),
            format_authors(remote.author.as_deref()),
        ),
        (
            text(local.container_title.as_deref()),
            text(remote.container_title()),
        ),
        (
            text(local.kind.as_deref()),
            text(remote.kind.as_deref().map(map_remote_type)),
        ),
        (text(local.page.as_deref()), text(remote.page.as_deref())),
        (text(local.volume.as_deref()), text(remote.volume.as_deref())),
        (text(local.issue.as_deref()), text(remote.issue.as_deref())),
        (
            local.issued.as_ref().and_then(DateField::to_ymd),
            remote.issued.as_ref().and_then(DateField::to_ymd),
        ),
    ]
}

/// Raw string, with blank values treated as absent.
fn text(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
