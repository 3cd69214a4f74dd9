//! Field value storage with change notification

use crate::error::{FormError, FormResult};
use crate::rules::Rules;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Handle returned by `subscribe`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) fn next(counter: &mut u64) -> Self {
        let id = ListenerId(*counter);
        *counter += 1;
        id
    }
}

type FieldListener = Box<dyn FnMut(&str)>;

/// Immutable copy of every field value, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSnapshot {
    values: Vec<(String, String)>,
}

impl FieldSnapshot {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> Vec<(String, String)> {
        self.values
    }
}

impl Serialize for FieldSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Current values of a fixed set of named fields.
///
/// The field set is decided at construction. Values only change through
/// [`set_value`](FieldStore::set_value) and [`reset`](FieldStore::reset), and
/// both notify every subscriber with the name of each changed field.
pub struct FieldStore {
    defaults: Vec<(String, String)>,
    values: HashMap<String, String>,
    listeners: Vec<(ListenerId, FieldListener)>,
    next_listener: u64,
}

impl std::fmt::Debug for FieldStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldStore")
            .field("values", &self.snapshot())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl FieldStore {
    /// Create a store from `(name, default)` pairs
    pub fn new<I, K, V>(fields: I) -> FormResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut defaults: Vec<(String, String)> = Vec::new();
        for (name, default) in fields {
            let name = name.into();
            if defaults.iter().any(|(existing, _)| *existing == name) {
                return Err(FormError::duplicate_field(name));
            }
            defaults.push((name, default.into()));
        }
        Ok(Self::with_defaults(defaults))
    }

    /// Create a store holding every field declared in `rules`
    pub fn from_rules(rules: &Rules) -> Self {
        Self::with_defaults(
            rules
                .fields()
                .iter()
                .map(|f| (f.name().to_string(), f.default_value().to_string()))
                .collect(),
        )
    }

    fn with_defaults(defaults: Vec<(String, String)>) -> Self {
        let values = defaults.iter().cloned().collect();
        Self {
            defaults,
            values,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Replace the value of a declared field and notify subscribers
    pub fn set_value(&mut self, field: &str, value: impl Into<String>) -> FormResult<()> {
        let slot = self
            .values
            .get_mut(field)
            .ok_or_else(|| FormError::unknown_field(field))?;
        *slot = value.into();
        self.notify(field);
        Ok(())
    }

    /// Current value of a declared field
    pub fn value(&self, field: &str) -> FormResult<&str> {
        self.values
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| FormError::unknown_field(field))
    }

    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            values: self
                .defaults
                .iter()
                .map(|(name, _)| (name.clone(), self.values.get(name).cloned().unwrap_or_default()))
                .collect(),
        }
    }

    /// Snapshot of the declared defaults
    pub fn defaults(&self) -> FieldSnapshot {
        FieldSnapshot {
            values: self.defaults.clone(),
        }
    }

    /// Restore every field to its default, notifying once per field
    pub fn reset(&mut self) {
        for (name, default) in &self.defaults {
            self.values.insert(name.clone(), default.clone());
        }
        let names: Vec<String> = self.defaults.iter().map(|(name, _)| name.clone()).collect();
        for name in &names {
            self.notify(name);
        }
    }

    /// True when every field holds its default
    pub fn is_pristine(&self) -> bool {
        self.defaults
            .iter()
            .all(|(name, default)| self.values.get(name) == Some(default))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.defaults.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_declared(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Register a listener called with the name of every changed field
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&str) + 'static,
    {
        let id = ListenerId::next(&mut self.next_listener);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, field: &str) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn contact_store() -> FieldStore {
        FieldStore::new([
            ("firstName", ""),
            ("lastName", ""),
            ("email", ""),
            ("message", ""),
        ])
        .unwrap()
    }

    fn recorder(store: &mut FieldStore) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |field| sink.borrow_mut().push(field.to_string()));
        seen
    }

    #[test]
    fn test_set_value_replaces_and_notifies() {
        let mut store = contact_store();
        let seen = recorder(&mut store);

        store.set_value("firstName", "warren").unwrap();

        assert_eq!(store.value("firstName").unwrap(), "warren");
        assert_eq!(*seen.borrow(), vec!["firstName".to_string()]);
    }

    #[test]
    fn test_set_value_unknown_field() {
        let mut store = contact_store();
        let seen = recorder(&mut store);

        let result = store.set_value("phone", "555-0100");

        assert_eq!(result, Err(FormError::unknown_field("phone")));
        assert!(seen.borrow().is_empty());
        assert!(store.value("phone").is_err());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result = FieldStore::new([("email", ""), ("email", "x")]);
        assert_eq!(result.err(), Some(FormError::duplicate_field("email")));
    }

    #[test]
    fn test_snapshot_is_ordered_and_detached() {
        let mut store = contact_store();
        store.set_value("email", "longmire@email.com").unwrap();

        let snapshot = store.snapshot();
        store.set_value("email", "changed@email.com").unwrap();

        assert_eq!(snapshot.get("email"), Some("longmire@email.com"));
        assert_eq!(
            snapshot.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["firstName", "lastName", "email", "message"]
        );
    }

    #[test]
    fn test_snapshot_serializes_as_object() {
        let mut store = contact_store();
        store.set_value("firstName", "warren").unwrap();

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert_eq!(json["firstName"], "warren");
        assert_eq!(json["message"], "");
    }

    #[test]
    fn test_reset_restores_defaults_and_notifies_every_field() {
        let mut store = FieldStore::new([("topic", "support"), ("message", "")]).unwrap();
        store.set_value("topic", "sales").unwrap();
        store.set_value("message", "hi").unwrap();
        assert!(!store.is_pristine());

        let seen = recorder(&mut store);
        store.reset();

        assert!(store.is_pristine());
        assert_eq!(store.snapshot(), store.defaults());
        assert_eq!(*seen.borrow(), vec!["topic".to_string(), "message".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = contact_store();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.set_value("lastName", "longmire").unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_value("lastName", "other").unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_from_rules_uses_declared_defaults() {
        let rules = Rules::new()
            .declare("firstName")
            .default_value("topic", "support");
        let store = FieldStore::from_rules(&rules);

        assert_eq!(store.field_names(), vec!["firstName", "topic"]);
        assert_eq!(store.value("topic").unwrap(), "support");
        assert!(store.is_declared("firstName"));
        assert!(!store.is_declared("lastName"));
    }
}
