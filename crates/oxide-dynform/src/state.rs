//! Current field values.

use crate::schema::FormField;
use crate::value::{FieldValue, FormData};

/// Holds the current value of every field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: FormData,
}

impl FormState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with one entry per field, each set to the field's
    /// initial value.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> Self {
        let values = fields
            .into_iter()
            .map(|field| (field.name.clone(), field.initial_value()))
            .collect();
        Self { values }
    }

    /// Replaces every entry with the initial values of `fields`.
    pub fn reset_to_defaults<'a>(&mut self, fields: impl IntoIterator<Item = &'a FormField>) {
        *self = Self::from_fields(fields);
    }

    /// Returns the value of one field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns the value of one field, treating a missing entry as `Null`.
    pub fn get_or_null(&self, name: &str) -> &FieldValue {
        const NULL: &FieldValue = &FieldValue::Null;
        self.values.get(name).unwrap_or(NULL)
    }

    /// Replaces the value of one field. Other entries are untouched.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Returns a copy of the values for handing to a submit handler.
    pub fn snapshot(&self) -> FormData {
        self.values.clone()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether the state has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Navn", FieldType::Text),
            FormField::new("consumption", "Forbruk", FieldType::Number),
            FormField::new("newsletter", "Nyhetsbrev", FieldType::Checkbox),
            FormField::new("property_type", "Boligtype", FieldType::Select)
                .default_value("house"),
        ]
    }

    #[test]
    fn test_from_fields() {
        let state = FormState::from_fields(&fields());
        assert_eq!(state.len(), 4);
        assert_eq!(state.get("name"), Some(&FieldValue::text("")));
        assert_eq!(state.get("consumption"), Some(&FieldValue::Null));
        assert_eq!(state.get("newsletter"), Some(&FieldValue::Bool(false)));
        assert_eq!(state.get("property_type"), Some(&FieldValue::text("house")));
    }

    #[test]
    fn test_set_preserves_other_entries() {
        let mut state = FormState::from_fields(&fields());
        state.set("name", "Kari");
        assert_eq!(state.get("name"), Some(&FieldValue::text("Kari")));
        assert_eq!(state.get("newsletter"), Some(&FieldValue::Bool(false)));
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_reset_reproduces_initial_values() {
        let fields = fields();
        let initial = FormState::from_fields(&fields);

        let mut state = initial.clone();
        state.set("name", "Kari");
        state.set("consumption", 1200.0);
        state.set("newsletter", true);
        state.set("property_type", "cabin");
        state.set("stray", "left over");

        state.reset_to_defaults(&fields);
        assert_eq!(state, initial);
    }

    #[test]
    fn test_iter_yields_every_entry() {
        let state = FormState::from_fields(&fields());
        let mut names: Vec<_> = state.iter().map(|(name, _)| name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["consumption", "name", "newsletter", "property_type"]);
    }

    #[test]
    fn test_missing_entry_reads_as_null() {
        let state = FormState::new();
        assert!(state.is_empty());
        assert_eq!(state.get_or_null("anything"), &FieldValue::Null);
    }
}
