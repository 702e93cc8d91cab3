use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::number::opt_string_or_number;
use super::{AuthorName, DateField, StringOrNumber};

/// Providers disagree on whether titles are a string or a list of strings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// The single value, or the first entry of a list.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value.as_str()),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

/// Metadata snapshot as returned by a remote provider.
///
/// Field names and the `type` vocabulary are the provider's, not the
/// library's; mapping into the local shape happens during comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RemoteMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<OneOrMany>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Vec<AuthorName>>,

    #[serde(
        rename = "container-title",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub container_title: Option<OneOrMany>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

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
}

impl RemoteMetadata {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().and_then(OneOrMany::first)
    }

    #[must_use]
    pub fn container_title(&self) -> Option<&str> {
        self.container_title.as_ref().and_then(OneOrMany::first)
    }
}
