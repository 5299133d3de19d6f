use thiserror::Error;

/// One failed field in a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldViolation>),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn permission(check: &str) -> Self {
        Self::Permission(check.to_string())
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_enumerates_fields() {
        let err = ServiceError::Validation(vec![
            FieldViolation::new("account_id", "is required"),
            FieldViolation::new("name", "must be a string"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("account_id is required"));
        assert!(msg.contains("name must be a string"));
    }
}
