//! # form-validation
//!
//! Field-scoped form validation: a declarative rule table, a field store
//! with change notification, and an engine that keeps the error map and
//! produces a snapshot on a successful submit.

pub mod engine;
pub mod error;
pub mod rules;
pub mod store;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use engine::{SubmitOutcome, ValidationEngine};
pub use error::{FormError, FormResult, ValidationError, ValidationErrors};
pub use rules::{FieldDefinition, Rules, RulesBuilder};
pub use store::{FieldSnapshot, FieldStore, ListenerId};
pub use traits::ValidationRule;

// Built-in validators
pub use validators::{
    custom::CustomValidator,
    email::EmailValidator,
    length::LengthValidator,
    required::RequiredValidator,
};
