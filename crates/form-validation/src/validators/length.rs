//! Length-based validator for text fields

use crate::error::ValidationError;
use crate::traits::{normalized, ValidationRule};
use serde_json::Value;

/// Validator for string length constraints.
///
/// Length is the character count of the trimmed value, so surrounding
/// whitespace never satisfies a minimum.
#[derive(Debug, Clone)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Exact length required
    pub exact: Option<usize>,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self {
            min: None,
            max: None,
            exact: None,
            message: None,
        }
    }

    /// Set minimum length constraint
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum length constraint
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set exact length requirement
    pub fn exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Set length range (min and max)
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn error(&self, field: &str, default_message: String, code: &str) -> ValidationError {
        let message = self.message.clone().unwrap_or(default_message);
        ValidationError::with_code(field, message, code)
    }
}

impl Default for LengthValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for LengthValidator {
    fn validate(&self, value: &str, field: &str) -> Option<ValidationError> {
        let length = normalized(value).chars().count();

        if let Some(exact) = self.exact {
            if length != exact {
                return Some(self.error(
                    field,
                    format!("{} must be exactly {} characters", field, exact),
                    "length_exact",
                ));
            }
            return None;
        }

        if let Some(min) = self.min {
            if length < min {
                return Some(self.error(
                    field,
                    format!("{} must be at least {} characters", field, min),
                    "length_min",
                ));
            }
        }

        if let Some(max) = self.max {
            if length > max {
                return Some(self.error(
                    field,
                    format!("{} must be at most {} characters", field, max),
                    "length_max",
                ));
            }
        }

        None
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(exact) = self.exact {
            params.insert("exact".to_string(), Value::from(exact));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_validator_min_constraint() {
        let validator = LengthValidator::new().min(5);

        let error = validator.validate("123", "firstName").unwrap();
        assert_eq!(error.message, "firstName must be at least 5 characters");
        assert_eq!(error.code, "length_min");

        assert!(validator.validate("abcde", "firstName").is_none());
        assert!(validator.validate("warren", "firstName").is_none());
    }

    #[test]
    fn test_length_validator_counts_trimmed_value() {
        let validator = LengthValidator::new().min(5);
        assert!(validator.validate("  abc   ", "firstName").is_some());
        assert!(validator.validate("   ", "firstName").is_some());
    }

    #[test]
    fn test_length_validator_max_constraint() {
        let validator = LengthValidator::new().max(5);

        assert!(validator.validate("hello", "name").is_none());

        let error = validator.validate("hello world", "name").unwrap();
        assert_eq!(error.message, "name must be at most 5 characters");
        assert_eq!(error.code, "length_max");
    }

    #[test]
    fn test_length_validator_exact_constraint() {
        let validator = LengthValidator::new().exact(4);

        assert!(validator.validate("test", "code").is_none());
        assert!(validator.validate("hi", "code").is_some());

        let error = validator.validate("testing", "code").unwrap();
        assert_eq!(error.code, "length_exact");
    }

    #[test]
    fn test_length_validator_range() {
        let validator = LengthValidator::new().range(3, 10);

        assert!(validator.validate("hi", "password").is_some());
        assert!(validator.validate("secret", "password").is_none());
        assert!(validator.validate("very_long_password", "password").is_some());
    }

    #[test]
    fn test_length_validator_unicode_support() {
        let validator = LengthValidator::new().max(5);

        assert!(validator.validate("café", "name").is_none());
        assert!(validator.validate("🦀🚀✨", "emoji").is_none());
        assert!(validator.validate("🦀🚀✨🎉🔥💯", "emoji").is_some());
    }

    #[test]
    fn test_length_validator_custom_message() {
        let validator = LengthValidator::new().min(8).message("Too short");
        let error = validator.validate("weak", "password").unwrap();
        assert_eq!(error.message, "Too short");
    }

    #[test]
    fn test_length_validator_parameters() {
        assert!(LengthValidator::new().parameters().is_none());

        let params = LengthValidator::new().range(2, 4).parameters().unwrap();
        assert_eq!(params["min"], 2);
        assert_eq!(params["max"], 4);
    }
}
