//! Similarity thresholds for metadata comparison.

use ref_match::SimilarityThresholds;
use ref_match::similarity::{
    AUTHOR_OVERLAP_THRESHOLD, TITLE_CONTAINMENT_THRESHOLD, TITLE_JACCARD_THRESHOLD,
};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_title_jaccard() -> f64 {
    TITLE_JACCARD_THRESHOLD
}

const fn default_title_containment() -> f64 {
    TITLE_CONTAINMENT_THRESHOLD
}

const fn default_author_overlap() -> f64 {
    AUTHOR_OVERLAP_THRESHOLD
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Minimum Jaccard index for two titles to count as the same work.
    #[serde(default = "default_title_jaccard")]
    pub title_jaccard: f64,

    /// Minimum containment coefficient for two titles.
    #[serde(default = "default_title_containment")]
    pub title_containment: f64,

    /// Minimum share of local family names found in the remote author list.
    #[serde(default = "default_author_overlap")]
    pub author_overlap: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            title_jaccard: default_title_jaccard(),
            title_containment: default_title_containment(),
            author_overlap: default_author_overlap(),
        }
    }
}

impl MatchingConfig {
    /// Reject thresholds outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("matching.title_jaccard", self.title_jaccard),
            ("matching.title_containment", self.title_containment),
            ("matching.author_overlap", self.author_overlap),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn thresholds(&self) -> SimilarityThresholds {
        SimilarityThresholds {
            title_jaccard: self.title_jaccard,
            title_containment: self.title_containment,
            author_overlap: self.author_overlap,
        }
    }
}
