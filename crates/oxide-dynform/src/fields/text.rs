//! String-valued field helpers.

use crate::schema::{FieldType, FormField};
use crate::validation::ValidationRule;

fn string_field(
    field_type: FieldType,
    name: &str,
    label: &str,
    required: Option<&str>,
) -> FormField {
    let field = FormField::new(name, label, field_type);
    match required {
        Some(message) => field
            .required()
            .validation(ValidationRule::new().required_message(message)),
        None => field,
    }
}

/// Creates a single-line text field. `required` carries the message shown
/// when the field is left empty.
pub fn text_field(name: &str, label: &str, required: Option<&str>) -> FormField {
    string_field(FieldType::Text, name, label, required)
}

/// Creates a multi-line text field.
pub fn textarea_field(name: &str, label: &str, required: Option<&str>) -> FormField {
    string_field(FieldType::Textarea, name, label, required)
}

/// Creates an email field that checks the address shape.
pub fn email_field(name: &str, label: &str, required: Option<&str>, invalid: &str) -> FormField {
    let rule = match required {
        Some(message) => ValidationRule::new().required_message(message),
        None => ValidationRule::new(),
    };
    let rule = rule
        .pattern(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$", invalid)
        .expect("email pattern compiles");

    let field = FormField::new(name, label, FieldType::Email).validation(rule);
    if required.is_some() {
        field.required()
    } else {
        field
    }
}

/// Creates a telephone field.
pub fn tel_field(name: &str, label: &str, required: Option<&str>) -> FormField {
    string_field(FieldType::Tel, name, label, required)
}
