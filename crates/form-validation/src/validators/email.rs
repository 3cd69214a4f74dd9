//! Email format validator

use crate::error::ValidationError;
use crate::traits::{normalized, ValidationRule};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// localpart@domain.tld: one '@', no whitespace, at least one '.' after the '@'
static EMAIL_WITH_TLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.][^\s@]*\.[^\s@.]+$").expect("valid email pattern"));

static EMAIL_WITHOUT_TLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email pattern"));

/// Validator for email address format.
///
/// Empty values pass; pair it with [`RequiredValidator`](super::RequiredValidator)
/// when the address is mandatory.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    /// Custom error message
    pub message: Option<String>,
    /// Require a dot-separated TLD after the '@'
    pub require_tld: bool,
}

impl EmailValidator {
    /// Create a new email validator with default settings
    pub fn new() -> Self {
        Self {
            message: None,
            require_tld: true,
        }
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Require top-level domain (e.g., .com, .org)
    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        self
    }

    fn is_valid_email(&self, email: &str) -> bool {
        let pattern: &Regex = if self.require_tld {
            &EMAIL_WITH_TLD
        } else {
            &EMAIL_WITHOUT_TLD
        };
        pattern.is_match(email)
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRule for EmailValidator {
    fn validate(&self, value: &str, field: &str) -> Option<ValidationError> {
        if normalized(value).is_empty() || self.is_valid_email(value) {
            return None;
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} must be a valid email address", field));

        Some(ValidationError::with_code(field, message, "invalid_email"))
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }
        params.insert("require_tld".to_string(), Value::Bool(self.require_tld));

        Some(Value::Object(params))
    }
}
