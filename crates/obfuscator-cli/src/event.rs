//! Object-created event envelope.

use obfuscator_types::{ObfuscationError, SourceLocator};
use serde_json::Value;

pub const BUCKET_POINTER: &str = "/detail/bucket/name";
pub const KEY_POINTER: &str = "/detail/object/key";

/// Prefix under which results are stored in the destination bucket.
pub const DESTINATION_PREFIX: &str = "obfuscated/";

/// Extract the source locator from an object-created event.
///
/// # Errors
///
/// Returns [`ObfuscationError::MalformedEvent`] naming the first missing or
/// non-string field.
pub fn parse_event(event: &Value) -> Result<SourceLocator, ObfuscationError> {
    let bucket = required_str(event, BUCKET_POINTER)?;
    let key = required_str(event, KEY_POINTER)?;
    Ok(SourceLocator::new(bucket, key))
}

/// Destination key for a source key: the original path under `obfuscated/`.
#[must_use]
pub fn destination_key(source_key: &str) -> String {
    format!("{DESTINATION_PREFIX}{source_key}")
}

fn required_str<'a>(event: &'a Value, pointer: &str) -> Result<&'a str, ObfuscationError> {
    event
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or_else(|| ObfuscationError::MalformedEvent {
            pointer: pointer.to_string(),
        })
}
