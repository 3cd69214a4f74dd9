//! Validation rules builder and composition system

use crate::error::{FormError, FormResult, ValidationError};
use crate::traits::ValidationRule;
use crate::validators::*;
use serde_json::Value;
use std::sync::Arc;

/// A declared field: its default value and ordered rule list
#[derive(Clone)]
pub struct FieldDefinition {
    name: String,
    default: String,
    rules: Vec<Arc<dyn ValidationRule>>,
}

impl FieldDefinition {
    fn new(name: String) -> Self {
        Self {
            name,
            default: String::new(),
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value the field holds after construction and after every reset
    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn rules(&self) -> &[Arc<dyn ValidationRule>] {
        &self.rules
    }

    /// A field is required when one of its rules is the required rule
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|rule| rule.rule_name() == "required")
    }

    /// Run every rule in declaration order against `value`.
    ///
    /// A failing rule that stops on failure ends the evaluation; all other
    /// failures accumulate.
    pub fn evaluate(&self, value: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            if let Some(error) = rule.validate(value, &self.name) {
                errors.push(error);
                if rule.stops_on_failure() {
                    break;
                }
            }
        }
        errors
    }
}

impl std::fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("rules", &self.rules.iter().map(|r| r.rule_name()).collect::<Vec<_>>())
            .finish()
    }
}

/// Ordered table of field declarations and their validation rules
#[derive(Clone, Default)]
pub struct Rules {
    fields: Vec<FieldDefinition>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("field_count", &self.fields.len())
            .field("fields", &self.field_names())
            .finish()
    }
}

impl Rules {
    /// Create a new empty rules collection
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    fn entry(&mut self, field: String) -> &mut FieldDefinition {
        let index = match self.fields.iter().position(|f| f.name == field) {
            Some(index) => index,
            None => {
                self.fields.push(FieldDefinition::new(field));
                self.fields.len() - 1
            }
        };
        &mut self.fields[index]
    }

    /// Declare a field without rules; declaring twice is a no-op
    pub fn declare(mut self, field: impl Into<String>) -> Self {
        self.entry(field.into());
        self
    }

    /// Set the default value of a field, declaring it if needed
    pub fn default_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.entry(field.into()).default = value.into();
        self
    }

    /// Add a validation rule for a specific field
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.entry(field.into()).rules.push(Arc::new(rule));
        self
    }

    /// Add multiple validation rules for a specific field
    pub fn field_rules<R>(mut self, field: impl Into<String>, rules: Vec<R>) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.entry(field.into())
            .rules
            .extend(rules.into_iter().map(|r| Arc::new(r) as Arc<dyn ValidationRule>));
        self
    }

    /// Get the declaration of a field
    pub fn get(&self, field: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == field)
    }

    /// Get rules for a specific field
    pub fn get_field_rules(&self, field: &str) -> Option<&[Arc<dyn ValidationRule>]> {
        self.get(field).map(|f| f.rules())
    }

    /// Validate `value` as the content of `field`
    pub fn validate_value(&self, field: &str, value: &str) -> FormResult<Vec<ValidationError>> {
        self.get(field)
            .map(|definition| definition.evaluate(value))
            .ok_or_else(|| FormError::unknown_field(field))
    }

    /// Declarations in declaration order
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    /// Declared field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn is_declared(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Check if there are any fields declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of declared fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Describe the rule table as JSON, one entry per field in declaration order
    pub fn describe(&self) -> Value {
        Value::Array(
            self.fields
                .iter()
                .map(|field| {
                    serde_json::json!({
                        "field": field.name,
                        "default": field.default,
                        "required": field.is_required(),
                        "rules": field.rules.iter().map(|rule| serde_json::json!({
                            "rule": rule.rule_name(),
                            "parameters": rule.parameters(),
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect(),
        )
    }
}

/// Builder for creating common validation rule combinations
pub struct RulesBuilder {
    rules: Rules,
    required_bails: bool,
}

impl RulesBuilder {
    /// Create a new rules builder
    pub fn new() -> Self {
        Self {
            rules: Rules::new(),
            required_bails: true,
        }
    }

    /// Whether required rules added from here on suppress the field's other rules
    pub fn required_bails(mut self, bail: bool) -> Self {
        self.required_bails = bail;
        self
    }

    /// Build and return the rules
    pub fn build(self) -> Rules {
        self.rules
    }

    fn required(&self) -> RequiredValidator {
        RequiredValidator::new().bail(self.required_bails)
    }

    /// Add validation rules for a required string field
    pub fn required_string(
        mut self,
        field: impl Into<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        let field = field.into();
        let required = self.required();
        self.rules = self.rules.field(field.clone(), required);
        self.length(field, min_length, max_length)
    }

    /// Add an optional string field with optional length limits
    pub fn optional_string(
        mut self,
        field: impl Into<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Self {
        let field = field.into();
        self.rules = self.rules.declare(field.clone());
        self.length(field, min_length, max_length)
    }

    fn length(mut self, field: String, min_length: Option<usize>, max_length: Option<usize>) -> Self {
        if min_length.is_some() || max_length.is_some() {
            let mut length_validator = LengthValidator::new();
            if let Some(min) = min_length {
                length_validator = length_validator.min(min);
            }
            if let Some(max) = max_length {
                length_validator = length_validator.max(max);
            }
            self.rules = self.rules.field(field, length_validator);
        }
        self
    }

    /// Add validation rules for a required email field
    pub fn required_email(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        let required = self.required();
        self.rules = self
            .rules
            .field(field.clone(), required)
            .field(field, EmailValidator::new());
        self
    }

    /// Add validation rules for an optional email field
    pub fn optional_email(mut self, field: impl Into<String>) -> Self {
        self.rules = self.rules.field(field, EmailValidator::new());
        self
    }

    /// Set the default value of a field
    pub fn default_value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.rules = self.rules.default_value(field, value);
        self
    }

    /// Add a custom validation rule
    pub fn custom<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.rules = self.rules.field(field, rule);
        self
    }
}

impl Default for RulesBuilder {
    fn default() -> Self {
        Self::new()
    }
}
