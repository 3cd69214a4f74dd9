//! Contact form configuration loaded from the environment

use std::env;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Tunables of the contact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormConfig {
    /// Minimum trimmed length of the first name
    pub first_name_min_length: usize,
    /// Re-validate a field each time its value changes
    pub validate_on_change: bool,
    /// An empty required field reports only the required message
    pub required_bails: bool,
    /// Log level handed to the logging setup
    pub log_level: String,
}

impl ContactFormConfig {
    pub fn new() -> Self {
        Self {
            first_name_min_length: 5,
            validate_on_change: true,
            required_bails: true,
            log_level: "info".to_string(),
        }
    }

    /// Load configuration from `CONTACT_FORM_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(value) = env::var("CONTACT_FORM_FIRST_NAME_MIN_LENGTH") {
            config.first_name_min_length = value.trim().parse().map_err(|_| {
                ConfigError::invalid_value("first_name_min_length", &value, "positive integer")
            })?;
        }

        if let Ok(value) = env::var("CONTACT_FORM_VALIDATE_ON_CHANGE") {
            config.validate_on_change = parse_bool("validate_on_change", &value)?;
        }

        if let Ok(value) = env::var("CONTACT_FORM_REQUIRED_BAILS") {
            config.required_bails = parse_bool("required_bails", &value)?;
        }

        if let Ok(level) = env::var("CONTACT_FORM_LOG_LEVEL") {
            config.log_level = level.trim().to_lowercase();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_name_min_length == 0 {
            return Err(ConfigError::validation_failed(
                "first_name_min_length must be greater than zero",
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::invalid_value(
                "log_level",
                &self.log_level,
                LOG_LEVELS.join(", "),
            ));
        }

        Ok(())
    }
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(field, value, "true or false")),
    }
}
