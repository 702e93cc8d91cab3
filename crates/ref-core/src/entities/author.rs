use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single contributor name.
///
/// The family name is the unit of identity comparison. A name with neither
/// part is valid and simply carries no information. Other CSL name keys
/// (`literal`, particles, `suffix`) are kept in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthorName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl AuthorName {
    #[must_use]
    pub fn new(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: Some(family.into()),
            given: Some(given.into()),
            extra: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn family(family: impl Into<String>) -> Self {
        Self {
            family: Some(family.into()),
            given: None,
            extra: BTreeMap::new(),
        }
    }

    /// Institutional name from the CSL `literal` key.
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        self.extra.get("literal").and_then(Value::as_str)
    }

    /// `"Family, Given"`, or whichever part is present, else the literal.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.family.as_deref(), self.given.as_deref()) {
            (Some(family), Some(given)) => format!("{family}, {given}"),
            (Some(family), None) => family.to_string(),
            (None, Some(given)) => given.to_string(),
            (None, None) => self.literal().unwrap_or_default().to_string(),
        }
    }
}
