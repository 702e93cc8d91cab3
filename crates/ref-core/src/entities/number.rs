use schemars::JsonSchema;
use serde::{Deserialize, Deserializer};

/// CSL number variables (`page`, `volume`, `issue`, ...) may be written as
/// strings or bare JSON numbers.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl StringOrNumber {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
        }
    }
}

/// `deserialize_with` target for optional number variables, normalized to
/// their string form.
pub(crate) fn opt_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}
