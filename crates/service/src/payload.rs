use serde_json::{Map, Value};

use crate::errors::{FieldViolation, ServiceError};

/// Request payload for one service invocation: a JSON object keyed by field
/// name, as supplied by the (out-of-scope) request-handling layer.
#[derive(Debug, Clone, Default)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Accepts only a JSON object.
    pub fn from_value(value: Value) -> Result<Self, ServiceError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ServiceError::Validation(vec![FieldViolation::new(
                "payload",
                "must be a JSON object",
            )])),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.0.get(field).and_then(Value::as_i64)
    }

    /// Integer id accessor for fields already covered by the rule set.
    pub fn id(&self, field: &str) -> Result<i64, ServiceError> {
        self.get_i64(field).ok_or_else(|| {
            ServiceError::Validation(vec![FieldViolation::new(field, "must be an integer id")])
        })
    }

    pub fn text(&self, field: &str) -> Result<&str, ServiceError> {
        self.0.get(field).and_then(Value::as_str).ok_or_else(|| {
            ServiceError::Validation(vec![FieldViolation::new(field, "must be a string")])
        })
    }

    pub fn opt_text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn opt_f64(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(Value::as_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_object_payloads() {
        assert!(Payload::from_value(json!([1, 2, 3])).is_err());
        assert!(Payload::from_value(json!("nope")).is_err());
        assert!(Payload::from_value(json!({"account_id": 1})).is_ok());
    }

    #[test]
    fn typed_getters() {
        let p = Payload::from_value(json!({
            "account_id": 1,
            "name": "Friend",
            "latitude": 12.5,
            "missing": null,
        }))
        .unwrap();
        assert_eq!(p.id("account_id").unwrap(), 1);
        assert_eq!(p.text("name").unwrap(), "Friend");
        assert_eq!(p.opt_f64("latitude"), Some(12.5));
        assert_eq!(p.opt_text("missing"), None);
        assert!(p.id("name").is_err());
    }
}
