//! The contact form: four fields on top of the validation engine

use crate::config::ContactFormConfig;
use crate::record::SubmittedRecord;
use form_validation::{
    FieldSnapshot, FormResult, ListenerId, Rules, RulesBuilder, SubmitOutcome, ValidationEngine,
    ValidationErrors,
};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";
pub const MESSAGE: &str = "message";

/// Rule table of the contact form.
///
/// | field       | rules                          |
/// |-------------|--------------------------------|
/// | `firstName` | required, minimum length       |
/// | `lastName`  | required                       |
/// | `email`     | required, email format         |
/// | `message`   | none                           |
pub fn contact_rules(config: &ContactFormConfig) -> Rules {
    RulesBuilder::new()
        .required_bails(config.required_bails)
        .required_string(FIRST_NAME, Some(config.first_name_min_length), None)
        .required_string(LAST_NAME, None, None)
        .required_email(EMAIL)
        .optional_string(MESSAGE, None, None)
        .build()
}

/// Contact form state: current values, current errors, submission
#[derive(Debug)]
pub struct ContactForm {
    engine: ValidationEngine,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::with_config(&ContactFormConfig::default())
    }

    pub fn with_config(config: &ContactFormConfig) -> Self {
        let engine = ValidationEngine::new(contact_rules(config))
            .validate_on_change(config.validate_on_change);
        Self { engine }
    }

    /// Apply user input to a field
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> FormResult<()> {
        self.engine.set_value(field, value)
    }

    pub fn validate_field(&mut self, field: &str) -> FormResult<Vec<String>> {
        self.engine.validate_field(field)
    }

    pub fn validate_all(&mut self) -> FormResult<&ValidationErrors> {
        self.engine.validate_all()
    }

    pub fn errors(&self) -> &ValidationErrors {
        self.engine.errors()
    }

    pub fn field_errors(&self, field: &str) -> Vec<&str> {
        self.engine.field_errors(field)
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        self.engine.store().snapshot()
    }

    pub fn on_fields_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str) + 'static,
    {
        self.engine.on_fields_changed(listener)
    }

    pub fn on_errors_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str, &[String]) + 'static,
    {
        self.engine.on_errors_changed(listener)
    }

    /// Validate every field; on success the form resets and the record is handed out
    pub fn submit(&mut self) -> FormResult<SubmitOutcome<SubmittedRecord>> {
        Ok(self.engine.try_submit()?.map(SubmittedRecord::from))
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}
