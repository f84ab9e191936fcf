//! Error taxonomy shared by the browse engine, the forms and the server functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a request against the Query Service, or of client-side checks before one.
///
/// An empty result page is not an error: zero matches is a normal state.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum QueryError {
    /// Request rejected, timed out, or answered with a non-success status.
    #[error("{0}")]
    Network(String),

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

impl QueryError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}

/// Per-field validation messages, keyed by the wire name of the field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        // first message wins, later checks on the same field are less specific
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self.fields.iter().map(|(k, v)| format!("{k}: {v}")).collect::<Vec<_>>();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for QueryError {
    fn from(value: ValidationErrors) -> Self {
        QueryError::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_per_field_is_kept() {
        let mut errors = ValidationErrors::new();
        errors.add("disease", "Disease name is required");
        errors.add("disease", "something else");
        assert_eq!(errors.get("disease"), Some("Disease name is required"));
        assert_eq!(errors.to_string(), "disease: Disease name is required");
    }

    #[test]
    fn network_error_displays_bare_message() {
        let err = QueryError::network("500 Internal Server Error: boom");
        assert_eq!(err.to_string(), "500 Internal Server Error: boom");
    }
}
