use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CSL date variable (`issued`, `accessed`, ...).
///
/// `season`, `circa` and `literal` are not interpreted and ride along in
/// `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DateField {
    #[serde(
        rename = "date-parts",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub date_parts: Option<Vec<Vec<i32>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DateField {
    #[must_use]
    pub fn from_parts(parts: &[i32]) -> Self {
        Self {
            date_parts: Some(vec![parts.to_vec()]),
            raw: None,
            extra: BTreeMap::new(),
        }
    }

    /// The first `[year, month?, day?]` entry, if it has at least a year.
    #[must_use]
    pub fn first_parts(&self) -> Option<&[i32]> {
        self.date_parts
            .as_ref()
            .and_then(|parts| parts.first())
            .filter(|first| !first.is_empty())
            .map(Vec::as_slice)
    }

    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.first_parts().map(|parts| parts[0])
    }

    /// `"Y-M-D"` from the first entry, omitting missing trailing parts.
    #[must_use]
    pub fn to_ymd(&self) -> Option<String> {
        self.first_parts().map(|parts| {
            parts
                .iter()
                .take(3)
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("-")
        })
    }
}
