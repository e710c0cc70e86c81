//! Error types for forms.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::schema::FormField;

/// Schema configuration errors.
///
/// These are authoring mistakes and are reported when a schema is loaded,
/// never while the user is filling in the form.
#[derive(Debug, Error)]
pub enum FormError {
    /// Two fields share a name.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// Two sections share a name.
    #[error("duplicate section name: {0}")]
    DuplicateSection(String),

    /// A validation pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A select option uses the empty string reserved for "no selection".
    #[error("select field {0} has an option with an empty value")]
    EmptyOptionValue(String),

    /// A value was supplied for a field the schema does not declare.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Schema or data parsing error.
    #[error("failed to parse form data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Failed to read a schema or settings file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a submit handler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The receiving side refused the data.
    #[error("submission rejected: {0}")]
    Rejected(String),

    /// The data could not be delivered.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Validation messages keyed by field name.
///
/// A field without an entry has no error. Entries are never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorState {
    errors: BTreeMap<String, String>,
}

impl ErrorState {
    /// Creates a new empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of validating one field.
    ///
    /// `Some` stores the message, `None` removes any previous entry. Other
    /// fields are left alone.
    pub fn set(&mut self, field: &str, message: Option<String>) {
        match message.filter(|m| !m.is_empty()) {
            Some(message) => {
                self.errors.insert(field.to_string(), message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    /// Removes the error for one field.
    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    /// Removes every error.
    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field has an error.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Returns the first field, in declaration order, that has an error.
    pub fn first_in<'a>(&self, fields: impl IntoIterator<Item = &'a FormField>) -> Option<&'a str> {
        fields
            .into_iter()
            .find(|field| self.contains(&field.name))
            .map(|field| field.name.as_str())
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl std::fmt::Display for ErrorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, FormField};

    #[test]
    fn test_set_and_clear() {
        let mut errors = ErrorState::new();
        errors.set("name", Some("Navn er påkrevd".to_string()));
        errors.set("email", Some("Ugyldig".to_string()));
        assert_eq!(errors.len(), 2);

        errors.set("name", None);
        assert!(!errors.contains("name"));
        assert_eq!(errors.get("email"), Some("Ugyldig"));
    }

    #[test]
    fn test_empty_message_is_no_error() {
        let mut errors = ErrorState::new();
        errors.set("name", Some(String::new()));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_first_in_uses_declaration_order() {
        let fields = vec![
            FormField::new("zeta", "Zeta", FieldType::Text),
            FormField::new("alpha", "Alpha", FieldType::Text),
        ];
        let mut errors = ErrorState::new();
        errors.set("alpha", Some("bad".to_string()));
        errors.set("zeta", Some("bad".to_string()));
        assert_eq!(errors.first_in(&fields), Some("zeta"));

        errors.clear("zeta");
        assert_eq!(errors.first_in(&fields), Some("alpha"));

        errors.clear_all();
        assert_eq!(errors.first_in(&fields), None);
    }

    #[test]
    fn test_iter_is_sorted_by_field() {
        let mut errors = ErrorState::new();
        errors.set("postal_code", Some("Postnummer må være 4 siffer".to_string()));
        errors.set("email", Some("Ugyldig e-postformat".to_string()));
        let entries: Vec<_> = errors.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("email", "Ugyldig e-postformat"),
                ("postal_code", "Postnummer må være 4 siffer"),
            ]
        );
    }

    #[test]
    fn test_display() {
        let mut errors = ErrorState::new();
        errors.set("phone", Some("Ugyldig telefonnummer".to_string()));
        assert_eq!(errors.to_string(), "phone: Ugyldig telefonnummer\n");
    }
}
