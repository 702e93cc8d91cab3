//! Readers for checker output and single JSON documents.

use std::io::BufReader;
use std::path::Path;

use ref_core::entities::CheckResult;
use ref_schema::SchemaRegistry;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;

const CHECK_RESULT_SCHEMA: &str = "check_result";

/// Read check results from `path`, validating each against its schema.
///
/// `.jsonl` files hold one result per line; anything else must be a JSON
/// array of results.
///
/// # Errors
///
/// Returns `StoreError::Io` / `StoreError::Json` on unreadable input and
/// `StoreError::Schema` for the first result that does not validate.
pub fn read_check_results(
    path: &Path,
    schemas: &SchemaRegistry,
) -> Result<Vec<CheckResult>, StoreError> {
    let values: Vec<Value> = if is_jsonl(path) {
        serde_jsonlines::json_lines(path)
            .map_err(|e| StoreError::io(path, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::io(path, e))?
    } else {
        read_json(path)?
    };

    let mut results = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        if let Err(err) = schemas.validate(CHECK_RESULT_SCHEMA, &value) {
            let errors = match err {
                ref_schema::SchemaError::ValidationFailed { errors } => errors,
                other => vec![other.to_string()],
            };
            return Err(StoreError::Schema {
                path: path.to_path_buf(),
                index,
                schema: CHECK_RESULT_SCHEMA,
                errors,
            });
        }
        results.push(serde_json::from_value(value).map_err(|e| StoreError::json(path, e))?);
    }

    tracing::debug!(path = %path.display(), results = results.len(), "check results read");
    Ok(results)
}

/// Deserialize one JSON document from `path`.
///
/// # Errors
///
/// Returns `StoreError::Io` or `StoreError::Json`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = std::fs::File::open(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| StoreError::json(path, e))
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}
