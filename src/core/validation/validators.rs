//! Field predicates backing each [`Rule`](super::Rule)
//!
//! Every predicate receives `None` when the field is absent from the payload.

use serde_json::Value;
use validator::ValidateEmail;

/// Field is a string with at least one non-whitespace character
pub fn required(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Field is a string accepted as an email address
pub fn email(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| s.validate_email())
}

/// Field is absent, null or a string
pub fn optional_string(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null) | Some(Value::String(_)))
}

/// Field is not a string longer than `limit` bytes
pub fn max_bytes(value: Option<&Value>, limit: usize) -> bool {
    value.and_then(Value::as_str).is_none_or(|s| s.len() <= limit)
}
