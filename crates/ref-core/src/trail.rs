//! JSONL mutation trail envelope.
//!
//! Each committed library mutation is appended as one `TrailEntry` line when
//! the library is saved. The `v` field versions the envelope; lines written
//! without it deserialize with `v == 1`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TrailOp;

const fn default_trail_version() -> u32 {
    1
}

/// A single committed mutation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailEntry {
    #[serde(default = "default_trail_version")]
    pub v: u32,

    pub ts: DateTime<Utc>,

    pub op: TrailOp,

    /// Citation key of the record at the time of the mutation.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Fields written by an update (empty for removals).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl TrailEntry {
    #[must_use]
    pub fn new(op: TrailOp, id: impl Into<String>, uuid: Option<String>) -> Self {
        Self {
            v: default_trail_version(),
            ts: Utc::now(),
            op,
            id: id.into(),
            uuid,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }
}
