//! Central schema registry.
//!
//! Schemas are built once at construction with [`schemars::schema_for!`] and
//! looked up by snake_case name.

use std::collections::HashMap;

use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;

/// Named JSON Schemas for refkeep's record, finding and result shapes.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Consumed shapes ---
        register!(
            schemas,
            "bibliographic_record",
            ref_core::entities::BibliographicRecord
        );
        register!(
            schemas,
            "remote_metadata",
            ref_core::entities::RemoteMetadata
        );
        register!(schemas, "check_finding", ref_core::entities::CheckFinding);
        register!(schemas, "check_result", ref_core::entities::CheckResult);

        // --- Produced shapes ---
        register!(
            schemas,
            "metadata_comparison_result",
            ref_core::responses::MetadataComparisonResult
        );
        register!(
            schemas,
            "duplicate_result",
            ref_core::responses::DuplicateResult
        );
        register!(
            schemas,
            "fix_interaction_result",
            ref_core::responses::FixInteractionResult
        );

        // --- Trail ---
        register!(schemas, "trail_entry", ref_core::trail::TrailEntry);

        Self { schemas }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` listing every violation.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Compilation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Registered schema names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
