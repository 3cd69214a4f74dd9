//! Required field validator

use crate::error::ValidationError;
use crate::traits::{normalized, ValidationRule};
use serde_json::Value;

/// Validator that ensures a field is not empty after trimming
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    /// Custom error message
    pub message: Option<String>,
    /// Stop evaluating the field's remaining rules when this one fails
    pub bail: bool,
}

impl RequiredValidator {
    /// Create a new required validator with default message
    pub fn new() -> Self {
        Self {
            message: None,
            bail: true,
        }
    }

    /// Create a required validator with custom message
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            bail: true,
        }
    }

    /// Whether an empty value suppresses the field's other rules
    pub fn bail(mut self, bail: bool) -> Self {
        self.bail = bail;
        self
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for RequiredValidator {
    fn validate(&self, value: &str, field: &str) -> Option<ValidationError> {
        if !normalized(value).is_empty() {
            return None;
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} is a required field", field));

        Some(ValidationError::with_code(field, message, "required"))
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        params.insert("bail".to_string(), Value::Bool(self.bail));
        Some(Value::Object(params))
    }

    fn stops_on_failure(&self) -> bool {
        self.bail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validator_with_empty_string() {
        let validator = RequiredValidator::new();
        let error = validator.validate("", "lastName").unwrap();

        assert_eq!(error.message, "lastName is a required field");
        assert_eq!(error.code, "required");
    }

    #[test]
    fn test_required_validator_with_whitespace_string() {
        let validator = RequiredValidator::new();
        assert!(validator.validate("   \t", "firstName").is_some());
    }

    #[test]
    fn test_required_validator_with_valid_string() {
        let validator = RequiredValidator::new();
        assert!(validator.validate("warren", "firstName").is_none());
        assert!(validator.validate("  w  ", "firstName").is_none());
    }

    #[test]
    fn test_required_validator_with_custom_message() {
        let validator = RequiredValidator::with_message("Tell us who you are");
        let error = validator.validate("", "firstName").unwrap();

        assert_eq!(error.message, "Tell us who you are");
    }

    #[test]
    fn test_required_validator_bail_setting() {
        assert!(RequiredValidator::new().stops_on_failure());
        assert!(!RequiredValidator::new().bail(false).stops_on_failure());
    }

    #[test]
    fn test_required_validator_parameters() {
        let params = RequiredValidator::with_message("needed").parameters().unwrap();
        assert_eq!(params["message"], "needed");
        assert_eq!(params["bail"], true);
    }
}
