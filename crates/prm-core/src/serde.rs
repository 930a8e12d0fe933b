//! JSON and YAML encoding with deterministic output.
//!
//! Object keys are emitted in sorted order regardless of how the source value
//! orders them, so byte output (and therefore hashes) depends only on content.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{ErrorInfo, PrmError};

fn encoding_failure(code: &'static str, err: impl ToString) -> PrmError {
    PrmError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(left, _), (right, _)| left.cmp(right));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, nested)| (key, sort_keys(nested)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}

/// Compact JSON with recursively sorted object keys.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PrmError> {
    let tree = serde_json::to_value(value).map_err(|err| encoding_failure("json_serialize", err))?;
    serde_json::to_vec(&sort_keys(tree)).map_err(|err| encoding_failure("json_write", err))
}

/// Decodes a JSON payload.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, PrmError> {
    serde_json::from_slice(data).map_err(|err| encoding_failure("json_deserialize", err))
}

/// Decodes a YAML payload.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, PrmError> {
    serde_yaml::from_slice(data).map_err(|err| encoding_failure("yaml_deserialize", err))
}

/// Reads `path` and decodes it as YAML.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, PrmError> {
    let bytes = fs::read(path).map_err(|err| {
        PrmError::Serde(
            ErrorInfo::new("yaml_read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    from_yaml_slice(&bytes)
}
