//! # contact-form
//!
//! The contact form built on `form-validation`: first name, last name, email
//! and an optional message. A successful submit yields a [`SubmittedRecord`]
//! and resets the form; delivering the record onward is up to the host.

pub mod config;
pub mod form;
pub mod logging;
pub mod record;

pub use config::{ConfigError, ContactFormConfig};
pub use form::{contact_rules, ContactForm, EMAIL, FIRST_NAME, LAST_NAME, MESSAGE};
pub use logging::{init_logging, LoggingConfig};
pub use record::SubmittedRecord;

pub use form_validation::{FormError, FormResult, SubmitOutcome, ValidationErrors};
