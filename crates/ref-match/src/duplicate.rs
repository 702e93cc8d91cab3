//! Add-time duplicate detection.
//!
//! A candidate is checked against every existing record for three kinds of
//! evidence, each reported at most once (first existing record wins):
//! - `doi`: identical normalized DOI
//! - `pmid`: identical PMID
//! - `title-author-year`: identical normalized title, overlapping family
//!   names and the same publication year
//!
//! All three rules are exact. Threshold-based similarity belongs to the
//! metadata comparator, which serves a different caller.

use std::collections::HashSet;

use ref_core::entities::BibliographicRecord;
use ref_core::enums::DuplicateType;
use ref_core::responses::{DuplicateDetails, DuplicateMatch, DuplicateResult};

use crate::normalize::normalize;
use crate::similarity::family_names;

/// URL and scheme prefixes stripped from DOIs before comparison.
const DOI_PREFIXES: [&str; 5] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// Trimmed, lower-cased DOI without resolver prefix. `None` if blank.
#[must_use]
pub fn normalize_doi(doi: &str) -> Option<String> {
    let lowered = doi.trim().to_lowercase();
    let bare = DOI_PREFIXES
        .iter()
        .find_map(|prefix| lowered.strip_prefix(prefix))
        .unwrap_or(&lowered)
        .trim();
    (!bare.is_empty()).then(|| bare.to_string())
}

/// Trimmed PMID. `None` if blank.
#[must_use]
pub fn normalize_pmid(pmid: &str) -> Option<String> {
    let trimmed = pmid.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Comparable identity of a record for the title/author/year rule.
struct CitationKey {
    title: String,
    families: HashSet<String>,
    year: i32,
}

impl CitationKey {
    fn of(record: &BibliographicRecord) -> Option<Self> {
        let title = normalize(record.title.as_deref()?);
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title,
            families: record
                .author
                .as_deref()
                .map(family_names)
                .unwrap_or_default(),
            year: record.year()?,
        })
    }

    /// Both author lists empty counts as agreement; one empty does not.
    fn authors_overlap(&self, other: &Self) -> bool {
        if self.families.is_empty() && other.families.is_empty() {
            return true;
        }
        !self.families.is_disjoint(&other.families)
    }

    fn matches(&self, other: &Self) -> bool {
        self.title == other.title && self.year == other.year && self.authors_overlap(other)
    }

    fn details(&self) -> DuplicateDetails {
        let mut authors: Vec<String> = self.families.iter().cloned().collect();
        authors.sort_unstable();
        DuplicateDetails {
            title: Some(self.title.clone()),
            authors,
            year: Some(self.year),
            ..DuplicateDetails::default()
        }
    }
}

/// Check `candidate` against `existing` records.
///
/// Records sharing the candidate's uuid are the candidate itself and are
/// ignored. Matches are ordered `doi`, `pmid`, `title-author-year`.
#[must_use]
pub fn detect_duplicates(
    candidate: &BibliographicRecord,
    existing: &[BibliographicRecord],
) -> DuplicateResult {
    let doi = candidate.doi.as_deref().and_then(normalize_doi);
    let pmid = candidate.pmid.as_deref().and_then(normalize_pmid);
    let key = CitationKey::of(candidate);

    let others: Vec<&BibliographicRecord> = existing
        .iter()
        .filter(|record| !same_uuid(candidate, record))
        .collect();

    let mut matches = Vec::new();

    if let Some(doi) = doi {
        let hit = others.iter().find(|record| {
            record.doi.as_deref().and_then(normalize_doi).as_deref() == Some(doi.as_str())
        });
        if let Some(record) = hit {
            matches.push(found(
                candidate,
                record,
                DuplicateType::Doi,
                DuplicateDetails {
                    doi: Some(doi),
                    ..DuplicateDetails::default()
                },
            ));
        }
    }

    if let Some(pmid) = pmid {
        let hit = others.iter().find(|record| {
            record.pmid.as_deref().and_then(normalize_pmid).as_deref() == Some(pmid.as_str())
        });
        if let Some(record) = hit {
            matches.push(found(
                candidate,
                record,
                DuplicateType::Pmid,
                DuplicateDetails {
                    pmid: Some(pmid),
                    ..DuplicateDetails::default()
                },
            ));
        }
    }

    if let Some(key) = key {
        let hit = others.iter().find(|record| {
            CitationKey::of(record).is_some_and(|existing| key.matches(&existing))
        });
        if let Some(record) = hit {
            matches.push(found(
                candidate,
                record,
                DuplicateType::TitleAuthorYear,
                key.details(),
            ));
        }
    }

    DuplicateResult::from_matches(matches)
}

fn same_uuid(candidate: &BibliographicRecord, record: &BibliographicRecord) -> bool {
    matches!((candidate.uuid(), record.uuid()), (Some(a), Some(b)) if a == b)
}

fn found(
    candidate: &BibliographicRecord,
    existing: &BibliographicRecord,
    kind: DuplicateType,
    details: DuplicateDetails,
) -> DuplicateMatch {
    tracing::debug!(candidate = %candidate.id, existing = %existing.id, %kind, "duplicate found");
    DuplicateMatch {
        kind,
        existing: existing.clone(),
        details: Some(details),
    }
}
