//! Checkbox field helper.

use crate::schema::{FieldType, FormField};
use crate::validation::ValidationRule;

/// Creates a checkbox field. A `required` message turns it into a must-tick
/// box, such as accepting terms.
pub fn checkbox_field(name: &str, label: &str, required: Option<&str>) -> FormField {
    let field = FormField::new(name, label, FieldType::Checkbox).default_value(false);
    match required {
        Some(message) => field
            .required()
            .validation(ValidationRule::new().required_message(message)),
        None => field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    #[test]
    fn test_checkbox_field() {
        let field = checkbox_field("newsletter", "Nyhetsbrev", None);
        assert_eq!(field.name, "newsletter");
        assert!(!field.required);
        assert_eq!(field.initial_value(), FieldValue::Bool(false));
    }

    #[test]
    fn test_required_checkbox_field() {
        let field = checkbox_field(
            "terms",
            "Jeg godtar vilkårene",
            Some("Du må godta vilkårene"),
        );
        assert!(field.required);
        assert!(field.validation.unwrap().is_required());
    }
}
