//! Validation error types and handling

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type FormResult<T> = Result<T, FormError>;

/// Programming errors raised when the form is addressed incorrectly.
///
/// These are never produced by user input; invalid input is reported through
/// [`ValidationErrors`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    #[error("duplicate field name: {name}")]
    DuplicateField { name: String },
}

impl FormError {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    pub fn duplicate_field(name: impl Into<String>) -> Self {
        Self::DuplicateField { name: name.into() }
    }
}

/// Individual validation error for a specific field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_failed".to_string(),
        }
    }

    /// Create a validation error with a specific code
    pub fn with_code(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }

    /// Set the error code
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Current validity state of a whole form, keyed by field name.
///
/// A field that has no active violations never has an entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    /// Map of field names to their validation errors, in rule order
    pub errors: HashMap<String, Vec<ValidationError>>,
}

impl ValidationErrors {
    /// Create a new empty validation errors collection
    pub fn new() -> Self {
        Self {
            errors: HashMap::new(),
        }
    }

    /// Add a single validation error
    pub fn add(&mut self, error: ValidationError) {
        self.errors
            .entry(error.field.clone())
            .or_default()
            .push(error);
    }

    /// Add a simple validation error with field and message
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let error = ValidationError::new(field.into(), message);
        self.add(error);
    }

    /// Replace the errors of a field; an empty list removes the entry.
    pub fn set_field_errors(&mut self, field: impl Into<String>, errors: Vec<ValidationError>) {
        let field = field.into();
        if errors.is_empty() {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, errors);
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Check if there are any validation errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of fields with errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Get total number of validation errors across all fields
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    /// Get errors for a specific field
    pub fn get_field_errors(&self, field: &str) -> Option<&Vec<ValidationError>> {
        self.errors.get(field)
    }

    /// Messages of a field in rule order; empty when the field is valid
    pub fn messages(&self, field: &str) -> Vec<&str> {
        self.errors
            .get(field)
            .map(|errors| errors.iter().map(|e| e.message.as_str()).collect())
            .unwrap_or_default()
    }

    /// Every message across all fields, fields in name order
    pub fn all_messages(&self) -> Vec<&str> {
        self.sorted_fields()
            .into_iter()
            .flat_map(|(_, errors)| errors.iter().map(|e| e.message.as_str()))
            .collect()
    }

    fn sorted_fields(&self) -> Vec<(&String, &Vec<ValidationError>)> {
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));
        fields
    }

    /// Check if a specific field has errors
    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.get(field).is_some_and(|errors| !errors.is_empty())
    }

    /// Convert to a JSON-serializable format for the rendering layer
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": self.errors
            }
        })
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            for (field, field_errors) in self.sorted_fields() {
                for error in field_errors {
                    write!(f, "\n  {}: {}", field, error.message)?;
                }
            }
            Ok(())
        }
    }
}
