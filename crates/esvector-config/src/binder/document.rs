//! Flattening of structured JSON documents into dotted key/value pairs.

use serde_json::{Map, Value};

use super::key::PropertyKey;
use crate::error::{ConfigError, ConfigResult};

/// Flattens `document` into `(dotted.key, value)` pairs.
///
/// Nested objects and dotted keys may be mixed freely. Scalars are rendered
/// in their JSON text form (strings without quotes) and `null` is skipped.
/// Arrays anywhere under `prefix` are rejected since no field there is a
/// list; arrays elsewhere are ignored.
pub(crate) fn flatten(
    document: &Value,
    prefix: &PropertyKey,
) -> ConfigResult<Vec<(String, String)>> {
    let Value::Object(root) = document else {
        return Err(ConfigError::invalid_document(format!(
            "expected an object at the root, found {}",
            value_kind(document)
        )));
    };

    let mut entries = Vec::new();
    flatten_object(root, "", prefix, &mut entries)?;
    Ok(entries)
}

fn flatten_object(
    object: &Map<String, Value>,
    path: &str,
    prefix: &PropertyKey,
    entries: &mut Vec<(String, String)>,
) -> ConfigResult<()> {
    for (key, value) in object {
        let path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };

        match value {
            Value::Null => {}
            Value::Bool(b) => entries.push((path, b.to_string())),
            Value::Number(n) => entries.push((path, n.to_string())),
            Value::String(s) => entries.push((path, s.clone())),
            Value::Object(nested) => flatten_object(nested, &path, prefix, entries)?,
            Value::Array(_) => {
                if PropertyKey::parse(&path).starts_with(prefix) {
                    return Err(ConfigError::invalid_document(format!(
                        "unexpected array at '{path}'"
                    )));
                }
            }
        }
    }

    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
