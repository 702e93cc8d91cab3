use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::number::opt_string_or_number;
use super::{AuthorName, DateField, StringOrNumber};
use crate::errors::CoreError;

/// Key under `custom` holding the immutable internal identifier.
const UUID_KEY: &str = "uuid";
/// Key under `custom` holding the tag list.
const TAGS_KEY: &str = "tags";

/// One entry of the personal library, in CSL-JSON shape.
///
/// `id` is the human-chosen citation key and may change over time; the
/// internal uuid kept in `custom.uuid` never does. Keys this struct does not
/// model are kept in `extra` so a load/save cycle is lossless.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BibliographicRecord {
    pub id: String,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<AuthorName>>,

    #[serde(
        rename = "container-title",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub container_title: Option<String>,

    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<StringOrNumber>")]
    pub page: Option<String>,

    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<StringOrNumber>")]
    pub volume: Option<String>,

    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<StringOrNumber>")]
    pub issue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<DateField>,

    #[serde(rename = "DOI", default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(
        rename = "PMID",
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<StringOrNumber>")]
    pub pmid: Option<String>,

    /// Opaque extension map (uuid, tags, attachments, timestamps).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BibliographicRecord {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Internal identifier from `custom.uuid`.
    #[must_use]
    pub fn uuid(&self) -> Option<&str> {
        self.custom.get(UUID_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.custom
            .insert(UUID_KEY.to_string(), Value::String(uuid.into()));
        self
    }

    /// Publication year from `issued`.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.issued.as_ref().and_then(DateField::year)
    }

    /// Tags stored under `custom.tags`. Non-string entries are ignored.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.custom
            .get(TAGS_KEY)
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `custom.tags` holds something other than a list.
    #[must_use]
    pub fn tags_are_malformed(&self) -> bool {
        self.custom.get(TAGS_KEY).is_some_and(|tags| !tags.is_array())
    }

    /// Add a tag unless it is already present. Returns whether it was added.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `custom.tags` is not a list; the
    /// value is left alone.
    pub fn add_tag(&mut self, tag: &str) -> Result<bool, CoreError> {
        if self.tags_are_malformed() {
            return Err(CoreError::Validation("custom.tags is not a list".into()));
        }
        if self.tags().contains(&tag) {
            return Ok(false);
        }

        if let Value::Array(tags) = self
            .custom
            .entry(TAGS_KEY.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            tags.push(Value::String(tag.to_string()));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_csl_json_and_keeps_unknown_keys() {
        let json = serde_json::json!({
            "id": "vaswani2017",
            "type": "article-journal",
            "title": "Attention Is All You Need",
            "author": [{ "family": "Vaswani", "given": "Ashish" }],
            "container-title": "NeurIPS",
            "issued": { "date-parts": [[2017]] },
            "DOI": "10.5555/3295222.3295349",
            "custom": { "uuid": "6f1c", "tags": ["transformers"] },
            "abstract": "The dominant sequence transduction models..."
        });

        let record: BibliographicRecord = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(record.kind.as_deref(), Some("article-journal"));
        assert_eq!(record.uuid(), Some("6f1c"));
        assert_eq!(record.year(), Some(2017));
        assert_eq!(record.tags(), vec!["transformers"]);
        assert!(record.extra.contains_key("abstract"));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn add_tag_is_idempotent() {
        let mut record = BibliographicRecord::new("a");
        assert!(record.add_tag("retracted").unwrap());
        assert!(!record.add_tag("retracted").unwrap());
        assert_eq!(record.tags(), vec!["retracted"]);
    }

    #[test]
    fn add_tag_leaves_malformed_tag_value_alone() {
        let mut record = BibliographicRecord::new("a");
        record
            .custom
            .insert("tags".to_string(), Value::String("important".to_string()));
        assert!(record.tags_are_malformed());

        let err = record.add_tag("concern").unwrap_err();
        assert!(err.to_string().contains("custom.tags is not a list"));
        assert_eq!(record.custom["tags"], Value::String("important".to_string()));
    }

    #[test]
    fn numeric_number_variables_are_accepted() {
        let record: BibliographicRecord = serde_json::from_value(serde_json::json!({
            "id": "a",
            "title": "T",
            "page": 42,
            "volume": 12,
            "issue": 3,
            "PMID": 31415926
        }))
        .unwrap();
        assert_eq!(record.page.as_deref(), Some("42"));
        assert_eq!(record.volume.as_deref(), Some("12"));
        assert_eq!(record.issue.as_deref(), Some("3"));
        assert_eq!(record.pmid.as_deref(), Some("31415926"));
        assert!(record.extra.is_empty());
    }
}
