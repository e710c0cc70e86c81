//! Declarative form schema.
//!
//! A [`FormConfig`] is plain data: a title, ordered sections and per-section
//! field definitions. Schemas are usually written as JSON using camelCase
//! keys and loaded with [`FormConfig::from_json`], which also runs the
//! structural checks in [`FormConfig::check`].

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FormError, Result};
use crate::validation::ValidationRule;
use crate::value::FieldValue;

/// The declared type of a field.
///
/// Unrecognized type names deserialize to [`FieldType::Unknown`] so that one
/// bad field does not prevent the rest of the schema from loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Tel,
    Select,
    Checkbox,
    Textarea,
    /// A type name with no widget behind it.
    Unknown(String),
}

impl FieldType {
    /// Returns the type name as written in a schema.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Textarea => "textarea",
            Self::Unknown(name) => name,
        }
    }

    /// Returns the value a field of this type starts with when the schema
    /// gives no default.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            Self::Number => FieldValue::Null,
            Self::Checkbox => FieldValue::Bool(false),
            Self::Text
            | Self::Email
            | Self::Tel
            | Self::Select
            | Self::Textarea
            | Self::Unknown(_) => FieldValue::text(""),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "textarea" => Self::Textarea,
            _ => Self::Unknown(name),
        }
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One entry of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed label.
    pub label: String,
}

impl SelectOption {
    /// Creates a new option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Definition of a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field label.
    pub label: String,
    /// Field name, unique across the whole form. Also the control's id.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field is marked as required in the UI.
    #[serde(default)]
    pub required: bool,
    /// Placeholder text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Choices for select fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Validation rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRule>,
    /// Initial value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    /// Help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    /// Whether the control is read-only.
    #[serde(default)]
    pub read_only: bool,
    /// Whether the control is disabled.
    #[serde(default)]
    pub disabled: bool,
    /// Extra element ids describing the control.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub described_by: Vec<String>,
}

impl FormField {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            name: name.into(),
            field_type,
            required: false,
            placeholder: None,
            options: Vec::new(),
            validation: None,
            default_value: None,
            help_text: None,
            read_only: false,
            disabled: false,
            described_by: Vec::new(),
        }
    }

    /// Marks the field as required in the UI.
    ///
    /// This only drives the required marker and aria attributes. Enforcement
    /// comes from [`ValidationRule::required`].
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Adds a select option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(SelectOption::new(value, label));
        self
    }

    /// Sets the validation rules.
    #[must_use]
    pub fn validation(mut self, rule: ValidationRule) -> Self {
        self.validation = Some(rule);
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Makes the control read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Disables the control.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Adds an element id to `aria-describedby`.
    #[must_use]
    pub fn described_by(mut self, id: impl Into<String>) -> Self {
        self.described_by.push(id.into());
        self
    }

    /// Returns the value this field starts with and is reset to.
    pub fn initial_value(&self) -> FieldValue {
        self.default_value
            .clone()
            .unwrap_or_else(|| self.field_type.empty_value())
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    /// Section title.
    pub title: String,
    /// Section name, unique within the form.
    pub name: String,
    /// Optional description shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in display order.
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSection {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }
}

/// A complete form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Form title.
    pub title: String,
    /// Optional description shown under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Submit button label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_text: Option<String>,
    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<FormSection>,
}

impl FormConfig {
    /// Creates a form with no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            submit_text: None,
            sections: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn submit_text(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }

    /// Adds a section.
    #[must_use]
    pub fn section(mut self, section: FormSection) -> Self {
        self.sections.push(section);
        self
    }

    /// Parses and checks a JSON schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reads, parses and checks a JSON schema file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Iterates over every field of every section in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> + Clone {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields().find(|field| field.name == name)
    }

    /// Checks the structural invariants the engine relies on.
    ///
    /// Field names must be unique across the flattened field list and section
    /// names unique among sections, since both are used as keys. Select
    /// option values must be non-empty because `""` means "no selection".
    pub fn check(&self) -> Result<()> {
        let mut sections = HashSet::new();
        for section in &self.sections {
            if !sections.insert(section.name.as_str()) {
                return Err(FormError::DuplicateSection(section.name.clone()));
            }
        }

        let mut names = HashSet::new();
        for field in self.fields() {
            if !names.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }

            match &field.field_type {
                FieldType::Select => {
                    if field.options.is_empty() {
                        warn!(field = %field.name, "select field has no options");
                    }
                    if field.options.iter().any(|o| o.value.is_empty()) {
                        return Err(FormError::EmptyOptionValue(field.name.clone()));
                    }
                }
                FieldType::Unknown(type_name) => {
                    warn!(field = %field.name, field_type = %type_name, "unknown field type");
                }
                _ if !field.options.is_empty() => {
                    warn!(field = %field.name, "options are ignored on non-select fields");
                }
                _ => {}
            }
        }

        Ok(())
    }
}
