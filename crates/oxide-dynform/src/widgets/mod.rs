//! Field-type dispatch.
//!
//! Every [`FieldType`] with a concrete control maps to one [`FieldWidget`]
//! variant. A widget renders its HTML control and turns what the control
//! reports (a [`RawInput`]) into a typed [`FieldValue`]. Unknown types have no
//! widget; callers render [`render_unknown`] in their place.

mod inputs;

pub use inputs::{CheckboxInput, NumberInput, SelectInput, TextInput, TextareaInput};

use tracing::warn;

use crate::schema::{FieldType, FormField};
use crate::value::FieldValue;

/// What a control reports on change or blur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    /// The control's string value.
    Text(String),
    /// A checkbox's checked state.
    Checked(bool),
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for RawInput {
    fn from(checked: bool) -> Self {
        Self::Checked(checked)
    }
}

/// An event reported upward by a field control, carrying the coerced value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Change { name: String, value: FieldValue },
    Blur { name: String, value: FieldValue },
}

/// Per-render inputs that do not come from the field definition.
#[derive(Debug, Clone, Copy)]
pub struct ControlContext<'a> {
    /// The field's current error, if any.
    pub error: Option<&'a str>,
    /// Label of the blank select option when the field has no placeholder.
    pub select_placeholder: &'a str,
}

impl<'a> ControlContext<'a> {
    /// Creates a context with no error.
    pub const fn new(select_placeholder: &'a str) -> Self {
        Self {
            error: None,
            select_placeholder,
        }
    }

    /// Sets the current error.
    #[must_use]
    pub const fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

/// Ordered HTML attributes of a control.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    /// Attribute name and value pairs, in render order.
    pub attrs: Vec<(String, String)>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self { attrs: Vec::new() }
    }

    /// Sets an attribute, replacing an existing one with the same name.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Sets a boolean attribute when `enabled` is true.
    pub fn flag(&mut self, key: &str, enabled: bool) {
        if enabled {
            self.set(key, key);
        }
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Renders attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, html_escape(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Attributes shared by every control: id, name, state flags and aria
    /// wiring.
    pub fn for_control(field: &FormField, ctx: &ControlContext<'_>) -> Self {
        let mut attrs = Self::new()
            .with("id", &field.name)
            .with("name", &field.name);
        attrs.flag("required", field.required);
        attrs.flag("disabled", field.disabled);
        attrs.set("aria-invalid", ctx.error.is_some().to_string());
        if let Some(ids) = described_by(field, ctx.error) {
            attrs.set("aria-describedby", ids);
        }
        attrs.set("aria-required", field.required.to_string());
        attrs
    }
}

/// Capabilities of a concrete control.
pub trait Widget: Send + Sync {
    /// Renders the control as HTML.
    fn render(&self, field: &FormField, value: &FieldValue, ctx: &ControlContext<'_>) -> String;

    /// Turns what the control reports into a typed value.
    fn coerce(&self, raw: RawInput) -> FieldValue;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }

    /// Whether the label is rendered after the control instead of before.
    fn label_follows(&self) -> bool {
        false
    }
}

/// The widget selected for a field type.
#[derive(Debug, Clone)]
pub enum FieldWidget {
    Text(TextInput),
    Number(NumberInput),
    Select(SelectInput),
    Textarea(TextareaInput),
    Checkbox(CheckboxInput),
}

impl FieldWidget {
    /// Selects the widget for a field type, or `None` for unknown types.
    pub fn for_type(field_type: &FieldType) -> Option<Self> {
        match field_type {
            FieldType::Text => Some(Self::Text(TextInput::text())),
            FieldType::Email => Some(Self::Text(TextInput::email())),
            FieldType::Tel => Some(Self::Text(TextInput::tel())),
            FieldType::Number => Some(Self::Number(NumberInput)),
            FieldType::Select => Some(Self::Select(SelectInput)),
            FieldType::Textarea => Some(Self::Textarea(TextareaInput::default())),
            FieldType::Checkbox => Some(Self::Checkbox(CheckboxInput)),
            FieldType::Unknown(_) => None,
        }
    }

    /// Selects the widget for a field.
    pub fn for_field(field: &FormField) -> Option<Self> {
        Self::for_type(&field.field_type)
    }

    fn widget(&self) -> &dyn Widget {
        match self {
            Self::Text(w) => w,
            Self::Number(w) => w,
            Self::Select(w) => w,
            Self::Textarea(w) => w,
            Self::Checkbox(w) => w,
        }
    }

    /// Renders the control.
    pub fn render(
        &self,
        field: &FormField,
        value: &FieldValue,
        ctx: &ControlContext<'_>,
    ) -> String {
        self.widget().render(field, value, ctx)
    }

    /// Coerces raw control input.
    pub fn coerce(&self, raw: RawInput) -> FieldValue {
        self.widget().coerce(raw)
    }

    /// Returns the HTML input type.
    pub fn input_type(&self) -> &str {
        self.widget().input_type()
    }

    /// Whether the label follows the control.
    pub fn label_follows(&self) -> bool {
        self.widget().label_follows()
    }

    /// Builds the change event for raw input.
    pub fn change_event(&self, field: &FormField, raw: RawInput) -> FieldEvent {
        FieldEvent::Change {
            name: field.name.clone(),
            value: self.coerce(raw),
        }
    }

    /// Builds the blur event for raw input.
    pub fn blur_event(&self, field: &FormField, raw: RawInput) -> FieldEvent {
        FieldEvent::Blur {
            name: field.name.clone(),
            value: self.coerce(raw),
        }
    }
}

/// Renders the visible placeholder that stands in for a field whose type has
/// no widget.
pub fn render_unknown(field: &FormField, label: &str) -> String {
    warn!(field = %field.name, field_type = %field.field_type, "unknown field type");
    format!(
        r#"<div class="unknown-field" role="alert"><p>{} <code>{}</code></p></div>"#,
        html_escape(label),
        html_escape(field.field_type.as_str())
    )
}

/// Builds the `aria-describedby` value: help text id, error id, then the
/// field's own extra ids.
pub fn described_by(field: &FormField, error: Option<&str>) -> Option<String> {
    let mut ids = Vec::new();
    if field.help_text.is_some() {
        ids.push(help_id(&field.name));
    }
    if error.is_some() {
        ids.push(error_id(&field.name));
    }
    ids.extend(field.described_by.iter().cloned());

    if ids.is_empty() {
        None
    } else {
        Some(ids.join(" "))
    }
}

/// Element id of a field's help text.
pub fn help_id(name: &str) -> String {
    format!("{name}-help")
}

/// Element id of a field's error message.
pub fn error_id(name: &str) -> String {
    format!("{name}-error")
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
