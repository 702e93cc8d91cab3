//! Result shapes handed back to callers.
//!
//! These are plain data: a CLI command or an API layer renders or transmits
//! them as-is. Field names serialize in camelCase.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::BibliographicRecord;
use crate::enums::{Classification, DuplicateType};

/// One differing field between the local record and the remote snapshot.
///
/// Both values are the comparable string forms; `None` means the field is
/// absent on that side. A field absent on both sides never yields a diff.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: String,
    pub local: Option<String>,
    pub remote: Option<String>,
}

/// Outcome of comparing a local record with remote metadata.
///
/// `changed_fields` and `field_diffs` name the same fields in the same order;
/// both are empty exactly when the classification is `no_change`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataComparisonResult {
    pub classification: Classification,
    pub changed_fields: Vec<String>,
    pub field_diffs: Vec<FieldDiff>,
}

impl MetadataComparisonResult {
    #[must_use]
    pub const fn no_change() -> Self {
        Self {
            classification: Classification::NoChange,
            changed_fields: Vec::new(),
            field_diffs: Vec::new(),
        }
    }
}

/// Normalized values that were compared to produce a duplicate match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DuplicateDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// An existing record the candidate duplicates, with the evidence type.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DuplicateMatch {
    #[serde(rename = "type")]
    pub kind: DuplicateType,
    pub existing: BibliographicRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<DuplicateDetails>,
}

/// All duplicate evidence found for one candidate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateResult {
    pub is_duplicate: bool,
    pub matches: Vec<DuplicateMatch>,
}

impl DuplicateResult {
    #[must_use]
    pub fn from_matches(matches: Vec<DuplicateMatch>) -> Self {
        Self {
            is_duplicate: !matches.is_empty(),
            matches,
        }
    }
}

/// Summary of one remediation run.
///
/// `total_findings` counts every finding of a resolvable warning result,
/// including findings that offered no actions, so
/// `applied + skipped + failed <= total_findings` always holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixInteractionResult {
    pub total_findings: u32,
    pub applied: u32,
    pub skipped: u32,
    #[serde(default)]
    pub failed: u32,
    pub removed: Vec<String>,
}
