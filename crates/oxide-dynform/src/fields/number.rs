//! Number field helper.

use crate::schema::{FieldType, FormField};
use crate::validation::ValidationRule;

/// Creates a number field bounded by `min` and `max`, each paired with its
/// violation message.
pub fn number_field(
    name: &str,
    label: &str,
    min: Option<(f64, &str)>,
    max: Option<(f64, &str)>,
) -> FormField {
    let mut rule = ValidationRule::new();
    if let Some((value, message)) = min {
        rule = rule.min(value, message);
    }
    if let Some((value, message)) = max {
        rule = rule.max(value, message);
    }
    FormField::new(name, label, FieldType::Number).validation(rule)
}
