//! Concrete field controls.

use super::{html_escape, ControlContext, RawInput, Widget, WidgetAttrs};
use crate::schema::FormField;
use crate::value::FieldValue;

fn control_class(base: &str, ctx: &ControlContext<'_>) -> String {
    if ctx.error.is_some() {
        format!("{base} is-invalid")
    } else {
        base.to_string()
    }
}

fn raw_to_text(raw: RawInput) -> FieldValue {
    match raw {
        RawInput::Text(text) => FieldValue::Text(text),
        RawInput::Checked(checked) => FieldValue::Text(checked.to_string()),
    }
}

/// Single-line string input. Text, email and tel share this widget and only
/// differ in the `type` attribute.
#[derive(Debug, Clone)]
pub struct TextInput {
    /// The HTML input type.
    pub input_type: &'static str,
}

impl TextInput {
    /// Creates a text input.
    pub const fn text() -> Self {
        Self { input_type: "text" }
    }

    /// Creates an email input.
    pub const fn email() -> Self {
        Self {
            input_type: "email",
        }
    }

    /// Creates a telephone input.
    pub const fn tel() -> Self {
        Self { input_type: "tel" }
    }
}

impl Widget for TextInput {
    fn render(&self, field: &FormField, value: &FieldValue, ctx: &ControlContext<'_>) -> String {
        let mut attrs = WidgetAttrs::for_control(field, ctx)
            .with("type", self.input_type)
            .with("class", control_class("form-control", ctx))
            .with("value", value.display_value());
        if let Some(placeholder) = &field.placeholder {
            attrs.set("placeholder", placeholder);
        }
        attrs.flag("readonly", field.read_only);
        format!("<input {}>", attrs.to_html())
    }

    fn coerce(&self, raw: RawInput) -> FieldValue {
        raw_to_text(raw)
    }

    fn input_type(&self) -> &str {
        self.input_type
    }
}

/// Numeric input. Empty input is `Null`; anything else is parsed, and an
/// unparsable string becomes NaN for validation to reject.
#[derive(Debug, Clone, Default)]
pub struct NumberInput;

impl Widget for NumberInput {
    fn render(&self, field: &FormField, value: &FieldValue, ctx: &ControlContext<'_>) -> String {
        let shown = match value {
            FieldValue::Text(_) | FieldValue::Number(_) => value.display_value(),
            FieldValue::Bool(_) | FieldValue::Null => String::new(),
        };
        let mut attrs = WidgetAttrs::for_control(field, ctx)
            .with("type", "number")
            .with("class", control_class("form-control", ctx))
            .with("value", shown);
        if let Some(placeholder) = &field.placeholder {
            attrs.set("placeholder", placeholder);
        }
        attrs.flag("readonly", field.read_only);
        format!("<input {}>", attrs.to_html())
    }

    fn coerce(&self, raw: RawInput) -> FieldValue {
        match raw {
            RawInput::Text(text) if text.is_empty() => FieldValue::Null,
            RawInput::Text(text) => FieldValue::Number(FieldValue::Text(text).to_number()),
            RawInput::Checked(checked) => FieldValue::Number(f64::from(u8::from(checked))),
        }
    }

    fn input_type(&self) -> &str {
        "number"
    }
}

/// Dropdown over the field's options, led by a blank "no selection" entry.
#[derive(Debug, Clone, Default)]
pub struct SelectInput;

impl Widget for SelectInput {
    fn render(&self, field: &FormField, value: &FieldValue, ctx: &ControlContext<'_>) -> String {
        let attrs = WidgetAttrs::for_control(field, ctx)
            .with("class", control_class("form-select", ctx));
        let current = value.as_str().unwrap_or("");
        let blank_label = field
            .placeholder
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(ctx.select_placeholder);

        let mut options = format!(r#"<option value="">{}</option>"#, html_escape(blank_label));
        for option in &field.options {
            let selected_attr = if option.value == current {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(&option.value),
                html_escape(&option.label)
            ));
        }

        format!("<select {}>{options}</select>", attrs.to_html())
    }

    fn coerce(&self, raw: RawInput) -> FieldValue {
        raw_to_text(raw)
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Multi-line string input.
#[derive(Debug, Clone)]
pub struct TextareaInput {
    /// Number of rows.
    pub rows: usize,
}

impl Default for TextareaInput {
    fn default() -> Self {
        Self { rows: 4 }
    }
}

impl Widget for TextareaInput {
    fn render(&self, field: &FormField, value: &FieldValue, ctx: &ControlContext<'_>) -> String {
        let mut attrs = WidgetAttrs::for_control(field, ctx)
            .with("class", control_class("form-control", ctx))
            .with("rows", self.rows.to_string());
        if let Some(placeholder) = &field.placeholder {
            attrs.set("placeholder", placeholder);
        }
        attrs.flag("readonly", field.read_only);
        format!(
            "<textarea {}>{}</textarea>",
            attrs.to_html(),
            html_escape(&value.display_value())
        )
    }

    fn coerce(&self, raw: RawInput) -> FieldValue {
        raw_to_text(raw)
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Boolean checkbox. Its label follows the control.
#[derive(Debug, Clone, Default)]
pub struct CheckboxInput;

impl Widget for CheckboxInput {
    fn render(&self, field: &FormField, value: &FieldValue, ctx: &ControlContext<'_>) -> String {
        let mut attrs = WidgetAttrs::for_control(field, ctx)
            .with("type", "checkbox")
            .with("class", control_class("form-check-input", ctx))
            .with("value", "true");
        attrs.flag("checked", value.as_bool());
        let required_marker = if field.required {
            r#"<span class="required-marker" aria-hidden="true">*</span>"#
        } else {
            ""
        };

        format!(
            concat!(
                r#"<div class="form-check"><input {}>"#,
                r#"<label class="form-check-label" for="{}">{}{}</label></div>"#,
            ),
            attrs.to_html(),
            html_escape(&field.name),
            html_escape(&field.label),
            required_marker
        )
    }

    fn coerce(&self, raw: RawInput) -> FieldValue {
        match raw {
            RawInput::Checked(checked) => FieldValue::Bool(checked),
            RawInput::Text(text) => FieldValue::Bool(matches!(text.as_str(), "true" | "on" | "1")),
        }
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }

    fn label_follows(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;

    fn ctx() -> ControlContext<'static> {
        ControlContext::new("Velg...")
    }

    #[test]
    fn test_text_input_render() {
        let field = FormField::new("name", "Navn", FieldType::Text)
            .required()
            .placeholder("Ditt fulle navn");
        let html = TextInput::text().render(&field, &FieldValue::text("Kari"), &ctx());
        assert!(html.starts_with("<input "));
        assert!(html.contains(r#"id="name""#));
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"value="Kari""#));
        assert!(html.contains(r#"placeholder="Ditt fulle navn""#));
        assert!(html.contains(r#"required="required""#));
        assert!(html.contains(r#"aria-required="true""#));
        assert!(html.contains(r#"aria-invalid="false""#));
    }

    #[test]
    fn test_text_input_error_and_read_only() {
        let field = FormField::new("email", "E-post", FieldType::Email)
            .read_only()
            .disabled();
        let html = TextInput::email().render(
            &field,
            &FieldValue::text("x"),
            &ctx().error(Some("Ugyldig e-postformat")),
        );
        assert!(html.contains(r#"type="email""#));
        assert!(html.contains("is-invalid"));
        assert!(html.contains(r#"aria-invalid="true""#));
        assert!(html.contains(r#"aria-describedby="email-error""#));
        assert!(html.contains(r#"readonly="readonly""#));
        assert!(html.contains(r#"disabled="disabled""#));
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(TextInput::tel().coerce("+47 123".into()), FieldValue::text("+47 123"));
    }

    #[test]
    fn test_number_coercion() {
        let widget = NumberInput;
        assert_eq!(widget.coerce("".into()), FieldValue::Null);
        assert_eq!(widget.coerce("-5".into()), FieldValue::Number(-5.0));
        assert_eq!(widget.coerce("1e3".into()), FieldValue::Number(1000.0));
        assert!(matches!(widget.coerce("abc".into()), FieldValue::Number(n) if n.is_nan()));
    }

    #[test]
    fn test_number_render_hides_non_numeric_values() {
        let field = FormField::new("n", "N", FieldType::Number);
        let html = NumberInput.render(&field, &FieldValue::Null, &ctx());
        assert!(html.contains(r#"value="""#));
        let html = NumberInput.render(&field, &FieldValue::Number(20000.0), &ctx());
        assert!(html.contains(r#"value="20000""#));
    }

    #[test]
    fn test_select_render() {
        let field = FormField::new("property_type", "Boligtype", FieldType::Select)
            .placeholder("Velg din boligtype")
            .option("apartment", "Leilighet")
            .option("house", "Enebolig");
        let html = SelectInput.render(&field, &FieldValue::text("house"), &ctx());
        assert!(html.contains(r#"<option value="">Velg din boligtype</option>"#));
        assert!(html.contains(r#"<option value="house" selected>Enebolig</option>"#));
        assert!(html.contains(r#"<option value="apartment">Leilighet</option>"#));
    }

    #[test]
    fn test_select_blank_falls_back_to_default_label() {
        let field = FormField::new("s", "S", FieldType::Select).option("a", "A");
        let html = SelectInput.render(&field, &FieldValue::text(""), &ctx());
        assert!(html.contains(r#"<option value="">Velg...</option>"#));
        assert!(!html.contains("selected"));
    }

    #[test]
    fn test_textarea_escapes_content() {
        let field = FormField::new("notes", "Notater", FieldType::Textarea);
        let html = TextareaInput::default().render(&field, &FieldValue::text("a < b"), &ctx());
        assert!(html.contains(r#"rows="4""#));
        assert!(html.contains(">a &lt; b</textarea>"));
    }

    #[test]
    fn test_checkbox_render_and_coercion() {
        let field = FormField::new("newsletter", "Nyhetsbrev", FieldType::Checkbox);
        let html = CheckboxInput.render(&field, &FieldValue::Bool(true), &ctx());
        let input_at = html.find("<input").unwrap();
        let label_at = html.find("<label").unwrap();
        assert!(input_at < label_at);
        assert!(html.contains(r#"checked="checked""#));
        assert!(CheckboxInput.label_follows());

        assert_eq!(CheckboxInput.coerce(true.into()), FieldValue::Bool(true));
        assert_eq!(CheckboxInput.coerce("on".into()), FieldValue::Bool(true));
        assert_eq!(CheckboxInput.coerce("".into()), FieldValue::Bool(false));
    }
}
