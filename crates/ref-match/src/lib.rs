//! # ref-match
//!
//! Pure matching logic for refkeep. Nothing here performs I/O.
//!
//! - [`normalize`]: case, diacritic and punctuation folding for comparison
//! - [`similarity`]: title (Jaccard / containment) and author (family-name
//!   overlap) predicates with permissive defaults for missing data
//! - [`compare`]: field-level diff of a local record against a remote
//!   snapshot, classified as `no_change`, `metadata_outdated` or
//!   `metadata_mismatch`
//! - [`duplicate`]: exact identifier and title/author/year duplicate
//!   detection at add time
//! - [`vocabulary`]: provider → local `type` mapping

pub mod compare;
pub mod duplicate;
pub mod normalize;
pub mod similarity;
pub mod vocabulary;

pub use compare::{COMPARED_FIELDS, MetadataComparator, compare_metadata, format_authors};
pub use duplicate::{detect_duplicates, normalize_doi, normalize_pmid};
pub use normalize::{normalize, tokenize};
pub use similarity::{SimilarityThresholds, is_author_similar, is_title_similar};
pub use vocabulary::map_remote_type;
