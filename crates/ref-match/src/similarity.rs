//! Title and author similarity predicates.
//!
//! Both predicates answer "is there enough evidence that these differ?" and
//! default to `true` (similar) when either side is missing. They are total:
//! no input makes them fail.
//!
//! Titles pass when either score clears its threshold:
//! - Jaccard `|A∩B| / |A∪B|` penalizes added and removed words symmetrically
//! - Containment `|A∩B| / min(|A|, |B|)` tolerates subtitles and truncation
//!
//! Authors compare normalized family names, anchored on the local list:
//! `|local ∩ remote| / |local|`.

use std::collections::HashSet;

use ref_core::entities::AuthorName;
use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, tokenize};

/// Default minimum Jaccard index for titles.
pub const TITLE_JACCARD_THRESHOLD: f64 = 0.5;
/// Default minimum containment coefficient for titles.
pub const TITLE_CONTAINMENT_THRESHOLD: f64 = 0.8;
/// Default minimum share of local family names found remotely.
pub const AUTHOR_OVERLAP_THRESHOLD: f64 = 0.5;

/// Thresholds used by the similarity predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityThresholds {
    pub title_jaccard: f64,
    pub title_containment: f64,
    pub author_overlap: f64,
}

impl Default for SimilarityThresholds {
    fn default() -> Self {
        Self {
            title_jaccard: TITLE_JACCARD_THRESHOLD,
            title_containment: TITLE_CONTAINMENT_THRESHOLD,
            author_overlap: AUTHOR_OVERLAP_THRESHOLD,
        }
    }
}

/// Raw title scores, exposed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleScores {
    pub jaccard: f64,
    pub containment: f64,
}

impl SimilarityThresholds {
    /// Whether two titles plausibly name the same work.
    #[must_use]
    pub fn is_title_similar(&self, local: Option<&str>, remote: Option<&str>) -> bool {
        match title_scores(local, remote) {
            Some(scores) => {
                scores.jaccard >= self.title_jaccard
                    || scores.containment >= self.title_containment
            }
            None => true,
        }
    }

    /// Whether enough local family names appear in the remote author list.
    #[must_use]
    pub fn is_author_similar(
        &self,
        local: Option<&[AuthorName]>,
        remote: Option<&[AuthorName]>,
    ) -> bool {
        match author_overlap(local, remote) {
            Some(overlap) => overlap >= self.author_overlap,
            None => true,
        }
    }
}

/// [`SimilarityThresholds::is_title_similar`] with default thresholds.
#[must_use]
pub fn is_title_similar(local: Option<&str>, remote: Option<&str>) -> bool {
    SimilarityThresholds::default().is_title_similar(local, remote)
}

/// [`SimilarityThresholds::is_author_similar`] with default thresholds.
#[must_use]
pub fn is_author_similar(local: Option<&[AuthorName]>, remote: Option<&[AuthorName]>) -> bool {
    SimilarityThresholds::default().is_author_similar(local, remote)
}

/// Jaccard and containment for two titles.
///
/// `None` when either title is absent or normalizes to no tokens.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn title_scores(local: Option<&str>, remote: Option<&str>) -> Option<TitleScores> {
    let local = tokenize(local?);
    let remote = tokenize(remote?);
    if local.is_empty() || remote.is_empty() {
        return None;
    }

    let intersection = local.intersection(&remote).count() as f64;
    let union = local.union(&remote).count() as f64;
    let smaller = local.len().min(remote.len()) as f64;

    Some(TitleScores {
        jaccard: intersection / union,
        containment: intersection / smaller,
    })
}

/// Share of local family names present remotely.
///
/// `None` when either list is absent, empty, or carries no family names.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn author_overlap(
    local: Option<&[AuthorName]>,
    remote: Option<&[AuthorName]>,
) -> Option<f64> {
    let local = family_names(local?);
    let remote = family_names(remote?);
    if local.is_empty() || remote.is_empty() {
        return None;
    }

    let shared = local.intersection(&remote).count() as f64;
    Some(shared / local.len() as f64)
}

/// Normalized, non-empty family names of an author list.
#[must_use]
pub fn family_names(authors: &[AuthorName]) -> HashSet<String> {
    authors
        .iter()
        .filter_map(|author| author.family.as_deref())
        .map(normalize)
        .filter(|family| !family.is_empty())
        .collect()
}
