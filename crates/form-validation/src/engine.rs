//! Validation engine: runs the rule table against the field store

use crate::error::{FormResult, ValidationErrors};
use crate::rules::Rules;
use crate::store::{FieldSnapshot, FieldStore, ListenerId};

type ErrorListener = Box<dyn FnMut(&str, &[String])>;

/// Result of a submit attempt.
///
/// A rejected submit is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T = FieldSnapshot> {
    /// Every field passed; carries the submitted values
    Accepted(T),
    /// At least one field failed; carries the full error map
    Rejected(ValidationErrors),
}

impl<T> SubmitOutcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn record(&self) -> Option<&T> {
        match self {
            SubmitOutcome::Accepted(record) => Some(record),
            SubmitOutcome::Rejected(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            SubmitOutcome::Accepted(_) => None,
            SubmitOutcome::Rejected(errors) => Some(errors),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SubmitOutcome<U> {
        match self {
            SubmitOutcome::Accepted(record) => SubmitOutcome::Accepted(f(record)),
            SubmitOutcome::Rejected(errors) => SubmitOutcome::Rejected(errors),
        }
    }

    pub fn into_result(self) -> Result<T, ValidationErrors> {
        match self {
            SubmitOutcome::Accepted(record) => Ok(record),
            SubmitOutcome::Rejected(errors) => Err(errors),
        }
    }
}

/// Evaluates a [`Rules`] table against the values held in its [`FieldStore`]
/// and keeps the resulting error map.
///
/// Validation is field-scoped: changing a field only re-validates that field.
/// Every field is validated together by [`validate_all`](Self::validate_all)
/// and [`try_submit`](Self::try_submit).
pub struct ValidationEngine {
    rules: Rules,
    store: FieldStore,
    errors: ValidationErrors,
    validate_on_change: bool,
    error_listeners: Vec<(ListenerId, ErrorListener)>,
    next_listener: u64,
}

impl std::fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("rules", &self.rules)
            .field("store", &self.store)
            .field("errors", &self.errors)
            .field("validate_on_change", &self.validate_on_change)
            .finish()
    }
}

impl ValidationEngine {
    /// Create an engine whose store holds every field declared in `rules`
    pub fn new(rules: Rules) -> Self {
        let store = FieldStore::from_rules(&rules);
        tracing::debug!(fields = ?rules.field_names(), "validation engine created");
        Self {
            rules,
            store,
            errors: ValidationErrors::new(),
            validate_on_change: true,
            error_listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Whether `set_value` re-validates the changed field
    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    /// Write a field value, then re-validate that field when validate-on-change is on
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> FormResult<()> {
        if let Err(error) = self.store.set_value(field, value) {
            tracing::warn!(field, "set_value on undeclared field");
            return Err(error);
        }
        if self.validate_on_change {
            self.validate_field(field)?;
        }
        Ok(())
    }

    /// Run the field's rules against its current value and record the outcome
    pub fn validate_field(&mut self, field: &str) -> FormResult<Vec<String>> {
        let value = match self.store.value(field) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(field, "validate_field on undeclared field");
                return Err(error);
            }
        };
        let errors = self.rules.validate_value(field, value)?;
        let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();

        tracing::debug!(field, violations = messages.len(), "field validated");

        self.errors.set_field_errors(field, errors);
        self.notify_errors(field, &messages);
        Ok(messages)
    }

    /// Validate every declared field and return the full error map.
    ///
    /// Fails only when the store no longer holds a declared field.
    pub fn validate_all(&mut self) -> FormResult<&ValidationErrors> {
        for name in self.declared_fields() {
            self.validate_field(&name)?;
        }
        Ok(&self.errors)
    }

    /// Validate everything; on success hand out the snapshot and reset the store
    pub fn try_submit(&mut self) -> FormResult<SubmitOutcome> {
        let errors = self.validate_all()?;
        if !errors.is_empty() {
            tracing::debug!(
                fields = errors.len(),
                violations = errors.total_errors(),
                "submit rejected"
            );
            return Ok(SubmitOutcome::Rejected(errors.clone()));
        }

        let snapshot = self.store.snapshot();
        self.store.reset();
        tracing::info!(fields = snapshot.len(), "submit accepted");
        Ok(SubmitOutcome::Accepted(snapshot))
    }

    /// Restore defaults and forget every recorded error.
    ///
    /// Error subscribers see an empty message list for every declared field.
    pub fn reset(&mut self) {
        self.store.reset();
        self.errors.clear();
        for name in self.declared_fields() {
            self.notify_errors(&name, &[]);
        }
        tracing::debug!("form reset");
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Messages currently recorded for a field
    pub fn field_errors(&self, field: &str) -> Vec<&str> {
        self.errors.messages(field)
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Subscribe to value changes of any field
    pub fn on_fields_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str) + 'static,
    {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe_fields(&mut self, id: ListenerId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Subscribe to error map updates; called after every field validation
    pub fn on_errors_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str, &[String]) + 'static,
    {
        let id = ListenerId::next(&mut self.next_listener);
        self.error_listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe_errors(&mut self, id: ListenerId) -> bool {
        let before = self.error_listeners.len();
        self.error_listeners.retain(|(listener_id, _)| *listener_id != id);
        self.error_listeners.len() != before
    }

    fn declared_fields(&self) -> Vec<String> {
        self.rules.field_names().into_iter().map(String::from).collect()
    }

    fn notify_errors(&mut self, field: &str, messages: &[String]) {
        for (_, listener) in self.error_listeners.iter_mut() {
            listener(field, messages);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use crate::rules::RulesBuilder;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> ValidationEngine {
        ValidationEngine::new(
            RulesBuilder::new()
                .required_string("firstName", Some(5), None)
                .required_string("lastName", None, None)
                .required_email("email")
                .optional_string("message", None, None)
                .build(),
        )
    }

    #[test]
    fn test_validate_field_updates_only_that_field() {
        let mut engine = engine();
        engine.set_value("firstName", "123").unwrap();

        assert_eq!(engine.field_errors("firstName"), vec!["firstName must be at least 5 characters"]);
        assert_eq!(engine.errors().total_errors(), 1);
        assert!(!engine.errors().has_field_errors("lastName"));
    }

    #[test]
    fn test_validate_field_is_idempotent() {
        let mut engine = engine();
        engine.set_value("email", "warren@gmail").unwrap();

        let first = engine.validate_field("email").unwrap();
        let entry = engine.errors().clone();
        let second = engine.validate_field("email").unwrap();

        assert_eq!(first, second);
        assert_eq!(&entry, engine.errors());
        assert_eq!(first, vec!["email must be a valid email address".to_string()]);
    }

    #[test]
    fn test_corrected_value_clears_entry() {
        let mut engine = engine();
        engine.set_value("lastName", "  ").unwrap();
        assert!(engine.errors().has_field_errors("lastName"));

        engine.set_value("lastName", "longmire").unwrap();
        assert!(engine.errors().get_field_errors("lastName").is_none());
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn test_validate_on_change_disabled() {
        let mut engine = engine().validate_on_change(false);
        engine.set_value("firstName", "123").unwrap();
        assert!(engine.errors().is_empty());

        assert_eq!(engine.validate_field("firstName").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_field_propagates() {
        let mut engine = engine();
        assert_eq!(
            engine.set_value("phone", "555"),
            Err(FormError::unknown_field("phone"))
        );
        assert_eq!(
            engine.validate_field("phone"),
            Err(FormError::unknown_field("phone"))
        );
    }

    #[test]
    fn test_validate_all_reports_every_field() {
        let mut engine = engine();
        let errors = engine.validate_all().unwrap();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.total_errors(), 3);
        assert_eq!(errors.messages("firstName"), vec!["firstName is a required field"]);
        assert!(!errors.has_field_errors("message"));
    }

    #[test]
    fn test_rejected_submit_leaves_values() {
        let mut engine = engine();
        engine.set_value("firstName", "warren").unwrap();

        let outcome = engine.try_submit().unwrap();

        assert!(!outcome.is_ok());
        assert_eq!(outcome.errors().unwrap().len(), 2);
        assert_eq!(engine.store().value("firstName").unwrap(), "warren");
    }

    #[test]
    fn test_accepted_submit_resets_store() {
        let mut engine = engine();
        engine.set_value("firstName", "warren").unwrap();
        engine.set_value("lastName", "longmire").unwrap();
        engine.set_value("email", "longmire@email.com").unwrap();

        let outcome = engine.try_submit().unwrap();
        let record = outcome.record().unwrap();

        assert_eq!(record.get("firstName"), Some("warren"));
        assert_eq!(record.get("message"), Some(""));
        assert!(engine.store().is_pristine());
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn test_listeners_observe_changes_and_errors() {
        let mut engine = engine();
        let changed = Rc::new(RefCell::new(Vec::new()));
        let reported = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&changed);
        engine.on_fields_changed(move |field| sink.borrow_mut().push(field.to_string()));
        let sink = Rc::clone(&reported);
        let errors_id = engine.on_errors_changed(move |field, messages| {
            sink.borrow_mut().push((field.to_string(), messages.len()))
        });

        engine.set_value("email", "warren@gmail").unwrap();

        assert_eq!(*changed.borrow(), vec!["email".to_string()]);
        assert_eq!(*reported.borrow(), vec![("email".to_string(), 1)]);

        assert!(engine.unsubscribe_errors(errors_id));
        engine.set_value("email", "warren@gmail.com").unwrap();
        assert_eq!(reported.borrow().len(), 1);
        assert_eq!(changed.borrow().len(), 2);
    }

    #[test]
    fn test_reset_clears_errors() {
        let mut engine = engine();
        engine.validate_all().unwrap();
        engine.set_value("message", "hello").unwrap();

        engine.reset();

        assert!(engine.errors().is_empty());
        assert!(engine.store().is_pristine());
    }

    #[test]
    fn test_reset_notifies_error_listeners_per_field() {
        let mut engine = engine();
        let reported = Rc::new(RefCell::new(Vec::new()));
        engine.validate_all().unwrap();

        let sink = Rc::clone(&reported);
        engine.on_errors_changed(move |field, messages| {
            sink.borrow_mut().push((field.to_string(), messages.len()))
        });
        engine.reset();

        assert_eq!(
            *reported.borrow(),
            vec![
                ("firstName".to_string(), 0),
                ("lastName".to_string(), 0),
                ("email".to_string(), 0),
                ("message".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_store_missing_declared_field_fails_validate_all() {
        let mut engine = engine();
        engine.store = FieldStore::new([("firstName", "")]).unwrap();

        assert_eq!(
            engine.validate_all().err(),
            Some(FormError::unknown_field("lastName"))
        );
        assert_eq!(
            engine.try_submit().err(),
            Some(FormError::unknown_field("lastName"))
        );
    }

    #[test]
    fn test_outcome_helpers() {
        let accepted: SubmitOutcome<u8> = SubmitOutcome::Accepted(1);
        assert_eq!(accepted.clone().map(|v| v + 1).record(), Some(&2));
        assert_eq!(accepted.into_result(), Ok(1));

        let rejected: SubmitOutcome<u8> = SubmitOutcome::Rejected(ValidationErrors::new());
        assert!(rejected.record().is_none());
        assert!(rejected.into_result().is_err());
    }
}
