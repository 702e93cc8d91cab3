use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RemoteMetadata;
use crate::enums::{CheckStatus, FindingKind};
use crate::responses::FieldDiff;

/// Structured context a checker attaches to a finding.
///
/// Fix actions read what they need from here (the remote snapshot for
/// metadata updates, the published DOI for version changes). Keys not
/// modelled explicitly are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FindingDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_fields: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_diffs: Vec<FieldDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retraction_doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One detected anomaly for a record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CheckFinding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FindingDetails>,
}

impl CheckFinding {
    #[must_use]
    pub fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: FindingDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// Result of checking a single record against its remote sources.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: String,
    pub uuid: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub findings: Vec<CheckFinding>,
    pub checked_at: DateTime<Utc>,
    #[serde(default)]
    pub checked_sources: Vec<String>,
}

impl CheckResult {
    /// Whether this result should be expanded into findings for remediation.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.status == CheckStatus::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_checker_output() {
        let result: CheckResult = serde_json::from_str(
            r#"{
                "id": "smith2020",
                "uuid": "0b5e",
                "status": "warning",
                "findings": [{
                    "type": "version_changed",
                    "message": "Preprint has been published",
                    "details": { "newDoi": "10.1000/published", "provider": "crossref" }
                }],
                "checkedAt": "2026-01-05T10:00:00Z",
                "checkedSources": ["crossref"]
            }"#,
        )
        .unwrap();

        assert!(result.is_actionable());
        let details = result.findings[0].details.as_ref().unwrap();
        assert_eq!(details.new_doi.as_deref(), Some("10.1000/published"));
        assert_eq!(details.extra.get("provider"), Some(&Value::from("crossref")));
    }

    #[test]
    fn ok_results_are_not_actionable() {
        let result: CheckResult = serde_json::from_str(
            r#"{"id": "a", "uuid": "u", "status": "ok", "checkedAt": "2026-01-05T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(!result.is_actionable());
        assert!(result.findings.is_empty());
        assert!(result.checked_sources.is_empty());
    }
}
