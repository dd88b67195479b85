//! Structural redaction of JSON-shaped log records.

use serde_json::{Map, Value};

use crate::patterns::{
    is_sensitive_key, HEX_RUN_RE, JWT_RE, MAX_DEPTH_REACHED, REDACTED, REDACTED_JWT,
    REDACTED_SECRET_KEY,
};
use crate::text::sanitize_text;

/// Deepest nesting level that is still traversed; anything below it is
/// replaced by [`MAX_DEPTH_REACHED`].
pub const MAX_DEPTH: usize = 10;

/// Return a copy of `value` with sensitive content replaced by markers.
///
/// - Object entries whose key contains a sensitive name are replaced with
///   `"[REDACTED]"` whatever their shape.
/// - Top-level and array-element strings shaped like a JWT or holding a long
///   hex run are replaced with a typed marker.
/// - Scalar values under non-sensitive object keys are left untouched.
/// - Nesting deeper than [`MAX_DEPTH`] collapses to `"[Max depth reached]"`.
pub fn sanitize_value(value: &Value) -> Value {
    sanitize_at_depth(value, 0)
}

/// [`sanitize_value`] followed by [`sanitize_text`] on every string that
/// survived, for records whose free-form fields may embed secrets.
pub fn sanitize_record(value: &Value) -> Value {
    let mut sanitized = sanitize_value(value);
    scrub_strings(&mut sanitized);
    sanitized
}

fn sanitize_at_depth(value: &Value, depth: usize) -> Value {
    if depth > MAX_DEPTH {
        return Value::String(MAX_DEPTH_REACHED.to_owned());
    }

    match value {
        Value::String(s) => Value::String(sanitize_string(s)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| sanitize_at_depth(item, depth + 1))
                .collect(),
        ),
        Value::Object(map) => Value::Object(sanitize_map(map, depth)),
        Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
    }
}

fn sanitize_map(map: &Map<String, Value>, depth: usize) -> Map<String, Value> {
    map.iter()
        .map(|(key, child)| {
            let sanitized = if is_sensitive_key(key) {
                Value::String(REDACTED.to_owned())
            } else if child.is_object() || child.is_array() {
                sanitize_at_depth(child, depth + 1)
            } else {
                child.clone()
            };
            (key.clone(), sanitized)
        })
        .collect()
}

fn sanitize_string(s: &str) -> String {
    if JWT_RE.is_match(s) {
        REDACTED_JWT.to_owned()
    } else if HEX_RUN_RE.is_match(s) {
        REDACTED_SECRET_KEY.to_owned()
    } else {
        s.to_owned()
    }
}

fn scrub_strings(value: &mut Value) {
    match value {
        Value::String(s) => *s = sanitize_text(s),
        Value::Array(items) => items.iter_mut().for_each(scrub_strings),
        Value::Object(map) => map.values_mut().for_each(scrub_strings),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
