//! Decoding of the backend's response shapes.
//!
//! Endpoints answer either with the bare payload or with the payload wrapped
//! under a named key (`{ "notifications": [...] }`, `{ "user": {...} }`).
//! Absent or `null` lists decode as empty.

use serde::de::DeserializeOwned;
use serde_json::Value;

use carebridge_core::AppError;
use carebridge_core::result::AppResult;

/// Decode a list that may be bare or wrapped under `key` (or `data`).
pub fn decode_list<T: DeserializeOwned>(body: Value, key: &str) -> AppResult<Vec<T>> {
    let list = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Array(_) => body,
        Value::Object(mut map) => match map.remove(key).or_else(|| map.remove("data")) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(inner @ Value::Array(_)) => inner,
            Some(other) => {
                return Err(AppError::malformed(format!(
                    "Expected '{key}' to be a list, got {}",
                    kind_of(&other)
                )));
            }
        },
        other => {
            return Err(AppError::malformed(format!(
                "Expected a list of {key}, got {}",
                kind_of(&other)
            )));
        }
    };

    serde_json::from_value(list).map_err(AppError::from)
}

/// Decode a document that may be bare or wrapped under `key` (or `data`).
///
/// The wrapper is only unwrapped when the named field is itself an object,
/// so a bare document that happens to have a scalar field called `key`
/// still decodes as-is.
pub fn decode_item<T: DeserializeOwned>(body: Value, key: &str) -> AppResult<T> {
    let item = match body {
        Value::Object(mut map) => {
            let wrapped_key = [key, "data"]
                .into_iter()
                .find(|k| matches!(map.get(*k), Some(Value::Object(_))));
            match wrapped_key {
                Some(k) => map.remove(k).unwrap_or(Value::Null),
                None => Value::Object(map),
            }
        }
        other => other,
    };

    serde_json::from_value(item).map_err(AppError::from)
}

/// Extract a human message from an error body.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "msg"]
        .into_iter()
        .find_map(|k| value.get(k).and_then(Value::as_str))
        .map(str::to_string)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
