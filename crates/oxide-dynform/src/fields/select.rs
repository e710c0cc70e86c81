//! Select field helper.

use crate::schema::{FieldType, FormField};
use crate::validation::ValidationRule;

/// Creates a select field from `(value, label)` pairs.
pub fn select_field(
    name: &str,
    label: &str,
    choices: Vec<(&str, &str)>,
    required: Option<&str>,
) -> FormField {
    let mut field = choices
        .into_iter()
        .fold(FormField::new(name, label, FieldType::Select), |field, (value, label)| {
            field.option(value, label)
        });

    if let Some(message) = required {
        field = field
            .required()
            .validation(ValidationRule::new().required_message(message));
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_field() {
        let choices = vec![("apartment", "Leilighet"), ("house", "Enebolig")];
        let field = select_field(
            "property_type",
            "Boligtype",
            choices,
            Some("Boligtype er påkrevd"),
        );
        assert_eq!(field.name, "property_type");
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[1].value, "house");
        assert!(field.required);
    }

    #[test]
    fn test_optional_select_field() {
        let field = select_field("tariff", "Tariff", vec![("spot", "Spotpris")], None);
        assert!(!field.required);
        assert!(field.validation.is_none());
    }
}
