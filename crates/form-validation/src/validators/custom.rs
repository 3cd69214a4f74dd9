//! Custom validation functions and closures

use crate::error::ValidationError;
use crate::traits::ValidationRule;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for validation closures: `(value, field)` to an optional message
pub type ValidationFn = Arc<dyn Fn(&str, &str) -> Option<String> + Send + Sync>;

/// Custom validator that accepts user-defined validation functions
#[derive(Clone)]
pub struct CustomValidator {
    /// Name/identifier for this custom validator
    pub name: String,
    validator: ValidationFn,
    /// Custom error message
    pub message: Option<String>,
}

impl CustomValidator {
    /// Create a new custom validator from a closure returning the failure message
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&str, &str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
            message: None,
        }
    }

    /// Create a validator from a predicate; `message` is reported when it returns false
    pub fn predicate<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let message = message.into();
        Self::new(name, move |value, _field| {
            (!predicate(value)).then(|| message.clone())
        })
    }

    /// Set custom error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Get the validator name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomValidator")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish()
    }
}

impl ValidationRule for CustomValidator {
    fn validate(&self, value: &str, field: &str) -> Option<ValidationError> {
        let failure = (self.validator)(value, field)?;
        let message = self.message.clone().unwrap_or(failure);
        Some(ValidationError::with_code(field, message, self.name.clone()))
    }

    fn rule_name(&self) -> &'static str {
        "custom"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        params.insert("name".to_string(), Value::String(self.name.clone()));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}
