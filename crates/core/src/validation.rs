//! Field-level validation of untyped JSON request bodies.
//!
//! Request handlers accept raw bytes, turn them into a JSON object with
//! [`parse_object`], and pull typed fields out with [`required_string`]. Every
//! problem found is collected into a [`ValidationErrors`] so clients see all
//! failing fields at once.
//!
//! ```
//! use stud_core::validation::{parse_object, required_string, ValidationErrors};
//!
//! let body = parse_object(br#"{"name": 42}"#).unwrap();
//! let mut errors = ValidationErrors::new();
//! assert!(required_string(&body, "name", &mut errors).is_none());
//! assert!(required_string(&body, "email", &mut errors).is_none());
//! assert_eq!(errors.field_errors.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message recorded for a field that is absent from the body.
pub const REQUIRED: &str = "Required";

/// A flattened validation failure.
///
/// Serializes as `{"formErrors": [...], "fieldErrors": {"field": [...]}}`.
/// Body-level problems (unparsable JSON, wrong top-level type) land in
/// `form_errors`; per-field problems are keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrors {
    /// Errors that are not tied to a single field.
    pub form_errors: Vec<String>,
    /// Errors keyed by the offending field, in field-name order.
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error set holding a single body-level error.
    #[must_use]
    pub fn form(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add_form(message);
        errors
    }

    /// Record a body-level error.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    /// Record an error against `field`.
    pub fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if no error has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Returns the messages recorded against `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    /// Turn the collected errors into a `Result`, yielding `value` when empty.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.field_errors.keys().map(String::as_str).collect();
        match (self.form_errors.first(), fields.is_empty()) {
            (Some(form), true) => write!(f, "invalid request: {form}"),
            (Some(form), false) => {
                write!(f, "invalid request: {form}; fields: {}", fields.join(", "))
            }
            (None, _) => write!(f, "invalid fields: {}", fields.join(", ")),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Parse a request body into a JSON object.
///
/// A body that decodes to a JSON string is decoded once more, since some
/// serverless front ends forward already-serialized JSON as a string.
///
/// # Errors
///
/// Returns a body-level [`ValidationErrors`] if the bytes are not JSON or do
/// not describe an object.
pub fn parse_object(body: &[u8]) -> Result<Map<String, Value>, ValidationErrors> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationErrors::form(format!("Malformed JSON body: {e}")))?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| ValidationErrors::form(format!("Malformed JSON body: {e}")))?,
        other => other,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ValidationErrors::form(format!(
            "Expected object, received {}",
            json_type_name(&other)
        ))),
    }
}

/// Read a required string field, recording an error if it is missing or not
/// a string.
pub fn required_string<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    match body.get(field) {
        None | Some(Value::Null) => {
            errors.add_field(field, REQUIRED);
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            errors.add_field(
                field,
                format!("Expected string, received {}", json_type_name(other)),
            );
            None
        }
    }
}

/// Name of a JSON value's type, as used in error messages.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_flattened_shape() {
        let mut errors = ValidationErrors::new();
        errors.add_field("url", "Invalid url");
        errors.add_field("url", "Too short");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            json!({ "formErrors": [], "fieldErrors": { "url": ["Invalid url", "Too short"] } })
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(5), Ok(5));
        assert!(ValidationErrors::form("bad").into_result(5).is_err());
    }

    #[test]
    fn test_parse_object_rejects_garbage() {
        let err = parse_object(b"not json").unwrap_err();
        assert_eq!(err.form_errors.len(), 1);
        assert!(err.form_errors[0].starts_with("Malformed JSON body"));
        assert!(err.field_errors.is_empty());
    }

    #[test]
    fn test_parse_object_rejects_non_object() {
        let err = parse_object(b"[1, 2]").unwrap_err();
        assert_eq!(err.form_errors, vec!["Expected object, received array"]);
    }

    #[test]
    fn test_parse_object_unwraps_encoded_string() {
        let body = serde_json::to_vec(&json!(r#"{"url":"https://a.io"}"#)).unwrap();
        let map = parse_object(&body).unwrap();
        assert_eq!(map.get("url"), Some(&json!("https://a.io")));
    }

    #[test]
    fn test_required_string() {
        let body = parse_object(br#"{"a": "x", "b": 1, "c": null}"#).unwrap();
        let mut errors = ValidationErrors::new();

        assert_eq!(required_string(&body, "a", &mut errors), Some("x"));
        assert_eq!(required_string(&body, "b", &mut errors), None);
        assert_eq!(required_string(&body, "c", &mut errors), None);
        assert_eq!(required_string(&body, "d", &mut errors), None);

        assert_eq!(errors.field("b").unwrap(), ["Expected string, received number"]);
        assert_eq!(errors.field("c").unwrap(), [REQUIRED]);
        assert_eq!(errors.field("d").unwrap(), [REQUIRED]);
        assert!(errors.field("a").is_none());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.add_field("url", "Invalid url");
        errors.add_field("action", "Required");
        assert_eq!(errors.to_string(), "invalid fields: action, url");
    }
}
