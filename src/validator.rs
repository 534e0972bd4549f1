use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::models::FeedResponse;

/// Checks a decoded JSON value against the feed schema and fills in every
/// declared default.
///
/// Types are strict and omissions are permissive: a missing `authorMeta`,
/// `details`, `comments`, `replies` or `cacheTtlSeconds` gets its default,
/// while a field of the wrong type anywhere in the tree rejects the whole
/// payload. Unknown keys are dropped.
pub fn validate_feed(value: &Value) -> Result<FeedResponse, ValidationError> {
    if !value.is_object() {
        return Err(ValidationError::new(format!(
            "expected an object at the top level, found {}",
            kind_of(value)
        )));
    }

    Ok(FeedResponse::deserialize(value)?)
}

/// Decodes raw response bytes and validates them. Malformed JSON is a
/// validation failure like any other.
pub fn validate_feed_slice(bytes: &[u8]) -> Result<FeedResponse, ValidationError> {
    let value: Value = serde_json::from_slice(bytes)?;
    validate_feed(&value)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
