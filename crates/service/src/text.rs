//! Loose text coercion for schema-less JSON input.
//!
//! Clients may send `5` where the document holds `"5"`; scalars are turned
//! into their textual form, containers are rejected.

use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Coerce a scalar JSON value into text; `null` becomes the empty string.
pub fn coerce_text(field: &str, value: Value) -> Result<String, ServiceError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(ServiceError::Validation(format!("field `{field}` must be text")))
        }
    }
}

/// Like [`coerce_text`] but keeps `null` distinct, for optional image fields.
pub fn coerce_optional_text(field: &str, value: Value) -> Result<Option<String>, ServiceError> {
    match value {
        Value::Null => Ok(None),
        other => coerce_text(field, other).map(Some),
    }
}

/// Require a JSON object body.
pub fn into_object(body: Value) -> Result<Map<String, Value>, ServiceError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ServiceError::Validation("request body must be a JSON object".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_become_text() {
        assert_eq!(coerce_text("price", json!(5)).unwrap(), "5");
        assert_eq!(coerce_text("price", json!(4.5)).unwrap(), "4.5");
        assert_eq!(coerce_text("title", json!(true)).unwrap(), "true");
        assert_eq!(coerce_text("title", Value::Null).unwrap(), "");
        assert_eq!(coerce_optional_text("imageData", Value::Null).unwrap(), None);
    }

    #[test]
    fn containers_are_rejected() {
        assert!(matches!(coerce_text("title", json!(["a"])), Err(ServiceError::Validation(_))));
        assert!(into_object(json!("nope")).is_err());
    }
}
