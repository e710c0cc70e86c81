//! Field validation rules and the validation engine.
//!
//! A field's [`ValidationRule`] is evaluated by [`validate_field`] in a fixed
//! order and the first failing check wins:
//!
//! 1. required
//! 2. empty-and-optional short circuit (skipped for checkboxes)
//! 3. `minLength` / `maxLength` on string values
//! 4. `pattern` on non-empty string values
//! 5. `min` / `max` on number fields, after numeric coercion

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorState, FormError};
use crate::schema::{FieldType, FormField};
use crate::settings::ValidationMessages;
use crate::state::FormState;
use crate::value::FieldValue;

/// The `required` entry of a rule: a flag or a custom message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredRule {
    Flag(bool),
    Message(String),
}

impl RequiredRule {
    /// Returns whether the rule actually requires a value. An empty message
    /// does not.
    pub fn is_required(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Message(message) => !message.is_empty(),
        }
    }

    fn message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Message(message) => message,
            Self::Flag(_) => fallback,
        }
    }
}

/// A character-count threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthRule {
    pub value: usize,
    pub message: String,
}

/// A numeric bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundRule {
    pub value: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPattern {
    value: String,
    message: String,
}

/// A compiled regular expression with its failure message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub struct PatternRule {
    regex: Regex,
    message: String,
}

impl PatternRule {
    /// Compiles a pattern. An invalid pattern is a schema error.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, FormError> {
        let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            message: message.into(),
        })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether the value contains a match.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for PatternRule {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() && self.message == other.message
    }
}

impl TryFrom<RawPattern> for PatternRule {
    type Error = FormError;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        Self::new(&raw.value, raw.message)
    }
}

impl From<PatternRule> for RawPattern {
    fn from(rule: PatternRule) -> Self {
        Self {
            value: rule.regex.as_str().to_string(),
            message: rule.message,
        }
    }
}

/// Constraints attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<RequiredRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<LengthRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<LengthRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<BoundRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<BoundRule>,
}

impl ValidationRule {
    /// Creates an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a value, using the default message.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = Some(RequiredRule::Flag(true));
        self
    }

    /// Requires a value, using a custom message.
    #[must_use]
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required = Some(RequiredRule::Message(message.into()));
        self
    }

    /// Sets the minimum character count.
    #[must_use]
    pub fn min_length(mut self, value: usize, message: impl Into<String>) -> Self {
        self.min_length = Some(LengthRule {
            value,
            message: message.into(),
        });
        self
    }

    /// Sets the maximum character count.
    #[must_use]
    pub fn max_length(mut self, value: usize, message: impl Into<String>) -> Self {
        self.max_length = Some(LengthRule {
            value,
            message: message.into(),
        });
        self
    }

    /// Sets the pattern. Fails if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Result<Self, FormError> {
        self.pattern = Some(PatternRule::new(pattern, message)?);
        Ok(self)
    }

    /// Sets the lower numeric bound.
    #[must_use]
    pub fn min(mut self, value: f64, message: impl Into<String>) -> Self {
        self.min = Some(BoundRule {
            value,
            message: message.into(),
        });
        self
    }

    /// Sets the upper numeric bound.
    #[must_use]
    pub fn max(mut self, value: f64, message: impl Into<String>) -> Self {
        self.max = Some(BoundRule {
            value,
            message: message.into(),
        });
        self
    }

    /// Returns whether the rule requires a value.
    pub fn is_required(&self) -> bool {
        self.required.as_ref().is_some_and(RequiredRule::is_required)
    }
}

/// Validates one value against a field's rules.
///
/// Returns the error message, or `None` if the value is acceptable. A field
/// without a rule is always valid.
pub fn validate_field(
    field: &FormField,
    value: &FieldValue,
    messages: &ValidationMessages,
) -> Option<String> {
    let rule = field.validation.as_ref()?;
    let is_checkbox = field.field_type == FieldType::Checkbox;

    if let Some(required) = rule.required.as_ref().filter(|r| r.is_required()) {
        let missing = if is_checkbox {
            value.is_empty()
        } else {
            value.is_blank()
        };
        if missing {
            return Some(required.message(&messages.required).to_string());
        }
    } else if value.is_empty() && !is_checkbox {
        return None;
    }

    if let FieldValue::Text(text) = value {
        let length = text.chars().count();

        if let Some(min) = rule.min_length.as_ref().filter(|min| length < min.value) {
            return Some(min.message.clone());
        }

        if let Some(max) = rule.max_length.as_ref().filter(|max| length > max.value) {
            return Some(max.message.clone());
        }

        if let Some(pattern) = &rule.pattern {
            if !text.is_empty() && !pattern.is_match(text) {
                return Some(pattern.message().to_string());
            }
        }
    }

    let has_number_input = !matches!(value, FieldValue::Null) && value.as_str() != Some("");
    if field.field_type == FieldType::Number && has_number_input {
        let number = value.to_number();
        if number.is_nan() {
            return Some(messages.invalid_number.clone());
        }

        if let Some(min) = rule.min.as_ref().filter(|min| number < min.value) {
            return Some(min.message.clone());
        }

        if let Some(max) = rule.max.as_ref().filter(|max| number > max.value) {
            return Some(max.message.clone());
        }
    }

    None
}

/// Validates every field against the current state.
///
/// Every field is re-evaluated on each call. The form is valid iff the
/// returned map is empty.
pub fn validate_form<'a>(
    fields: impl IntoIterator<Item = &'a FormField>,
    state: &FormState,
    messages: &ValidationMessages,
) -> ErrorState {
    let mut errors = ErrorState::new();
    for field in fields {
        let message = validate_field(field, state.get_or_null(&field.name), messages);
        errors.set(&field.name, message);
    }
    errors
}

/// Validates one field and records the outcome, leaving other entries as
/// they are.
pub fn validate_single_field(
    errors: &mut ErrorState,
    field: &FormField,
    value: &FieldValue,
    messages: &ValidationMessages,
) {
    errors.set(&field.name, validate_field(field, value, messages));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> ValidationMessages {
        ValidationMessages::default()
    }

    fn check(field: &FormField, value: impl Into<FieldValue>) -> Option<String> {
        validate_field(field, &value.into(), &messages())
    }

    fn postal_code() -> FormField {
        FormField::new("postal_code", "Postnummer", FieldType::Text).validation(
            ValidationRule::new()
                .required_message("Postnummer er påkrevd")
                .pattern("^[0-9]{4}$", "Postnummer må være 4 siffer")
                .unwrap(),
        )
    }

    fn consumption() -> FormField {
        FormField::new("annual_consumption", "Årlig forbruk", FieldType::Number).validation(
            ValidationRule::new()
                .min(0.0, "Forbruk kan ikke være negativt")
                .max(100_000.0, "Forbruk kan ikke overstige 100,000 kWh"),
        )
    }

    #[test]
    fn test_no_rule_is_always_valid() {
        let field = FormField::new("free", "Fritt", FieldType::Text);
        assert_eq!(check(&field, ""), None);
        assert_eq!(check(&field, FieldValue::Null), None);
    }

    #[test]
    fn test_engine_messages_are_configurable() {
        let messages = ValidationMessages::english();
        let name = FormField::new("name", "Name", FieldType::Text)
            .validation(ValidationRule::new().required());
        let rooms = FormField::new("rooms", "Rooms", FieldType::Number)
            .validation(ValidationRule::new().min(1.0, "At least one room"));

        assert_eq!(
            validate_field(&name, &FieldValue::text(""), &messages),
            Some("This field is required.".to_string())
        );
        assert_eq!(
            validate_field(&rooms, &FieldValue::text("many"), &messages),
            Some("Must be a valid number.".to_string())
        );
    }

    #[test]
    fn test_required_default_and_custom_message() {
        let plain = FormField::new("a", "A", FieldType::Text)
            .validation(ValidationRule::new().required());
        assert_eq!(check(&plain, "   "), Some("Feltet er påkrevd".to_string()));
        assert_eq!(check(&plain, FieldValue::Null), Some("Feltet er påkrevd".to_string()));
        assert_eq!(check(&plain, "x"), None);

        let custom = FormField::new("b", "B", FieldType::Select)
            .validation(ValidationRule::new().required_message("Boligtype er påkrevd"));
        assert_eq!(check(&custom, ""), Some("Boligtype er påkrevd".to_string()));
        assert_eq!(check(&custom, "house"), None);
    }

    #[test]
    fn test_empty_required_message_is_not_required() {
        let field = FormField::new("a", "A", FieldType::Text)
            .validation(ValidationRule::new().required_message(""));
        assert_eq!(check(&field, ""), None);
    }

    #[test]
    fn test_required_checkbox() {
        let field = FormField::new("terms", "Vilkår", FieldType::Checkbox)
            .validation(ValidationRule::new().required_message("Du må godta vilkårene"));
        assert_eq!(check(&field, false), Some("Du må godta vilkårene".to_string()));
        assert_eq!(check(&field, FieldValue::Null), Some("Du må godta vilkårene".to_string()));
        assert_eq!(check(&field, true), None);
    }

    #[test]
    fn test_optional_empty_short_circuits() {
        let field = FormField::new("phone", "Telefon", FieldType::Tel).validation(
            ValidationRule::new()
                .min_length(8, "For kort")
                .pattern("^(\\+47)?[0-9]{8}$", "Ugyldig telefonnummer")
                .unwrap(),
        );
        assert_eq!(check(&field, ""), None);
        assert_eq!(check(&field, FieldValue::Null), None);
        assert_eq!(check(&field, "123"), Some("For kort".to_string()));
        assert_eq!(check(&field, "+4712345678"), None);
    }

    #[test]
    fn test_whitespace_optional_value_is_still_checked() {
        let field = FormField::new("name", "Navn", FieldType::Text)
            .validation(ValidationRule::new().min_length(2, "Navn må være minst 2 tegn"));
        assert_eq!(check(&field, " "), Some("Navn må være minst 2 tegn".to_string()));
    }

    #[test]
    fn test_length_counts_characters() {
        let field = FormField::new("street", "Adresse", FieldType::Text).validation(
            ValidationRule::new()
                .min_length(5, "Adressen må være minst 5 tegn")
                .max_length(6, "For lang"),
        );
        assert_eq!(check(&field, "Bøgt"), Some("Adressen må være minst 5 tegn".to_string()));
        assert_eq!(check(&field, "Ørsta"), None);
        assert_eq!(check(&field, "Ørstavik"), Some("For lang".to_string()));
    }

    #[test]
    fn test_min_length_checked_before_pattern() {
        let field = FormField::new("code", "Kode", FieldType::Text).validation(
            ValidationRule::new()
                .min_length(4, "For kort")
                .pattern("^[0-9]+$", "Bare siffer")
                .unwrap(),
        );
        assert_eq!(check(&field, "ab"), Some("For kort".to_string()));
        assert_eq!(check(&field, "abcd"), Some("Bare siffer".to_string()));
    }

    #[test]
    fn test_postal_code_pattern() {
        let field = postal_code();
        assert_eq!(check(&field, "123"), Some("Postnummer må være 4 siffer".to_string()));
        assert_eq!(check(&field, "1234"), None);
        assert_eq!(check(&field, ""), Some("Postnummer er påkrevd".to_string()));
    }

    #[test]
    fn test_number_range() {
        let field = consumption();
        assert_eq!(
            check(&field, -5.0),
            Some("Forbruk kan ikke være negativt".to_string())
        );
        assert_eq!(
            check(&field, "-5"),
            Some("Forbruk kan ikke være negativt".to_string())
        );
        assert_eq!(
            check(&field, 100_001.0),
            Some("Forbruk kan ikke overstige 100,000 kWh".to_string())
        );
        assert_eq!(check(&field, 0.0), None);
        assert_eq!(check(&field, 20_000.0), None);
    }

    #[test]
    fn test_number_empty_optional() {
        let field = consumption();
        assert_eq!(check(&field, ""), None);
        assert_eq!(check(&field, FieldValue::Null), None);
    }

    #[test]
    fn test_optional_zero_skips_bounds() {
        let field = FormField::new("rooms", "Antall rom", FieldType::Number)
            .validation(ValidationRule::new().min(1.0, "Minst ett rom"));
        assert_eq!(check(&field, 0.0), None);
        assert_eq!(check(&field, "0"), Some("Minst ett rom".to_string()));

        let required = FormField::new("rooms", "Antall rom", FieldType::Number)
            .validation(ValidationRule::new().required().min(1.0, "Minst ett rom"));
        assert_eq!(check(&required, 0.0), Some("Minst ett rom".to_string()));
    }

    #[test]
    fn test_number_not_a_number_preempts_range() {
        let field = consumption();
        assert_eq!(check(&field, "abc"), Some("Må være et gyldig tall.".to_string()));
        assert_eq!(
            check(&field, f64::NAN),
            Some("Må være et gyldig tall.".to_string())
        );
    }

    #[test]
    fn test_invalid_pattern_is_schema_error() {
        let result = ValidationRule::new().pattern("([0-9]", "never");
        assert!(matches!(result, Err(FormError::InvalidPattern { .. })));
    }

    #[test]
    fn test_invalid_pattern_fails_deserialization() {
        let json = r#"{ "pattern": { "value": "(", "message": "x" } }"#;
        assert!(serde_json::from_str::<ValidationRule>(json).is_err());
    }

    #[test]
    fn test_rule_from_json() {
        let json = r#"{
            "required": "E-post er påkrevd",
            "minLength": { "value": 3, "message": "kort" },
            "pattern": { "value": "@", "message": "Ugyldig e-postformat" },
            "min": { "value": 0, "message": "neg" }
        }"#;
        let rule: ValidationRule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule.required,
            Some(RequiredRule::Message("E-post er påkrevd".to_string()))
        );
        assert_eq!(rule.min_length.as_ref().map(|r| r.value), Some(3));
        assert_eq!(rule.pattern.as_ref().map(PatternRule::as_str), Some("@"));
        assert!(rule.is_required());

        let flag: ValidationRule = serde_json::from_str(r#"{ "required": true }"#).unwrap();
        assert_eq!(flag.required, Some(RequiredRule::Flag(true)));
    }

    #[test]
    fn test_validate_form_collects_failures_only() {
        let name = FormField::new("name", "Navn", FieldType::Text)
            .validation(ValidationRule::new().required_message("Navn er påkrevd"));
        let email = FormField::new("email", "E-post", FieldType::Email).validation(
            ValidationRule::new()
                .required()
                .pattern("^[^@]+@[^@]+$", "Ugyldig e-postformat")
                .unwrap(),
        );
        let fields = vec![name, email];

        let mut state = FormState::from_fields(&fields);
        state.set("email", "ola@example.no");

        let errors = validate_form(&fields, &state, &messages());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Navn er påkrevd"));

        let again = validate_form(&fields, &state, &messages());
        assert_eq!(errors, again);
    }

    #[test]
    fn test_validate_single_field_touches_one_entry() {
        let field = postal_code();
        let mut errors = ErrorState::new();
        errors.set("email", Some("Ugyldig e-postformat".to_string()));

        validate_single_field(&mut errors, &field, &FieldValue::text("12"), &messages());
        assert_eq!(errors.get("postal_code"), Some("Postnummer må være 4 siffer"));
        assert_eq!(errors.get("email"), Some("Ugyldig e-postformat"));

        validate_single_field(&mut errors, &field, &FieldValue::text("0150"), &messages());
        assert!(!errors.contains("postal_code"));
        assert_eq!(errors.len(), 1);
    }
}
