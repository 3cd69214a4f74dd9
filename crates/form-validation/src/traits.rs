//! Core validation traits

use crate::error::ValidationError;
use serde_json::Value;

/// Core validation trait that all validators must implement.
///
/// A rule is a pure check over a single field value: it reports at most one
/// error per evaluation and never looks at other fields.
pub trait ValidationRule: Send + Sync {
    /// Validate a single value, returning the violation if there is one
    fn validate(&self, value: &str, field: &str) -> Option<ValidationError>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }

    /// Whether a failure of this rule skips the remaining rules of the field
    fn stops_on_failure(&self) -> bool {
        false
    }
}

/// Trimmed view used by every rule that treats whitespace-only input as empty
pub(crate) fn normalized(value: &str) -> &str {
    value.trim()
}
