//! The record handed to the consumer after a successful submit

use crate::form::{EMAIL, FIRST_NAME, LAST_NAME, MESSAGE};
use form_validation::FieldSnapshot;
use serde::{Deserialize, Serialize};

/// Values of the contact form at the moment of a successful submit.
///
/// Once emitted the form keeps no reference to it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl SubmittedRecord {
    /// `(label, value)` pairs to render; the message is left out when empty
    pub fn display_entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = vec![
            ("First Name", self.first_name.as_str()),
            ("Last Name", self.last_name.as_str()),
            ("Email", self.email.as_str()),
        ];
        if !self.message.is_empty() {
            entries.push(("Message", self.message.as_str()));
        }
        entries
    }

    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

impl From<FieldSnapshot> for SubmittedRecord {
    fn from(snapshot: FieldSnapshot) -> Self {
        let field = |name: &str| snapshot.get(name).unwrap_or_default().to_string();
        Self {
            first_name: field(FIRST_NAME),
            last_name: field(LAST_NAME),
            email: field(EMAIL),
            message: field(MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> SubmittedRecord {
        SubmittedRecord {
            first_name: "warren".to_string(),
            last_name: "longmire".to_string(),
            email: "longmire@email.com".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_display_entries_skip_empty_message() {
        let record = record("");
        let entries = record.display_entries();
        assert_eq!(
            entries,
            vec![
                ("First Name", "warren"),
                ("Last Name", "longmire"),
                ("Email", "longmire@email.com"),
            ]
        );
        assert!(!record.has_message());
    }

    #[test]
    fn test_display_entries_show_message_verbatim() {
        let record = record("warrenlongmiremessage");
        assert_eq!(record.display_entries().last(), Some(&("Message", "warrenlongmiremessage")));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(record("hi")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "firstName": "warren",
                "lastName": "longmire",
                "email": "longmire@email.com",
                "message": "hi",
            })
        );
    }
}
