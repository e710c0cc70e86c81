//! Form rendering.

use ironhtml::html;
use ironhtml_elements::{Div, Fieldset, Legend, H1, P};

use crate::error::ErrorState;
use crate::schema::{FormConfig, FormField};
use crate::settings::FormSettings;
use crate::state::FormState;
use crate::submit::SubmissionStatus;
use crate::value::FieldValue;
use crate::widgets::{error_id, help_id, html_escape, render_unknown, ControlContext, FieldWidget};

const TITLE_ID: &str = "form-main-title";
const DESCRIPTION_ID: &str = "form-main-description";

/// Renders one field: label, control, help text and error message.
///
/// Checkboxes carry their own label after the control. Fields whose type has
/// no widget render a visible placeholder instead.
pub fn render_field(
    field: &FormField,
    value: &FieldValue,
    error: Option<&str>,
    settings: &FormSettings,
) -> String {
    let Some(widget) = FieldWidget::for_field(field) else {
        return render_unknown(field, &settings.unknown_type_label);
    };

    let ctx = ControlContext::new(&settings.select_placeholder).error(error);
    let control_html = widget.render(field, value, &ctx);

    let mut block = html! { div.class("form-field") };
    if !widget.label_follows() {
        let id = &field.name;
        let label_text = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };
        let label_el = html! {
            label.for_(#id).class("form-label") { #label_text }
        };
        block = block.raw(label_el.render());
    }
    block = block.raw(&control_html);

    if let Some(help) = &field.help_text {
        let id = help_id(&field.name);
        block = block.child::<P, _>(|p| {
            p.class("form-text")
                .attr("id", id.as_str())
                .text(help.as_str())
        });
    }

    if let Some(error) = error {
        let id = error_id(&field.name);
        block = block.child::<P, _>(|p| {
            p.class("invalid-feedback")
                .attr("id", id.as_str())
                .attr("role", "alert")
                .text(error)
        });
    }

    block.render()
}

/// Renders the whole form: header, one fieldset per section, the success
/// message while it is visible and the submit button.
///
/// The form is marked `novalidate`; validation is the engine's job and the
/// embedding page is expected to prevent the default submit navigation.
pub fn render_form(
    config: &FormConfig,
    state: &FormState,
    errors: &ErrorState,
    status: &SubmissionStatus,
    settings: &FormSettings,
) -> String {
    let title = &config.title;
    let mut header = html! { div.class("form-header") }
        .child::<H1, _>(|h| h.attr("id", TITLE_ID).text(title.as_str()));
    if let Some(description) = &config.description {
        header = header.child::<P, _>(|p| p.attr("id", DESCRIPTION_ID).text(description.as_str()));
    }

    let mut form = html! { form.class("dynamic-form") }
        .attr("novalidate", "novalidate")
        .attr("aria-labelledby", TITLE_ID);
    if config.description.is_some() {
        form = form.attr("aria-describedby", DESCRIPTION_ID);
    }

    for section in &config.sections {
        form = form.child::<Fieldset, _>(|fieldset| {
            let mut fieldset = fieldset
                .class("form-section")
                .child::<Legend, _>(|legend| legend.text(section.title.as_str()));

            if let Some(description) = &section.description {
                let id = format!("{}-description", section.name);
                fieldset = fieldset.child::<P, _>(|p| {
                    p.class("section-description")
                        .attr("id", id.as_str())
                        .text(description.as_str())
                });
            }

            for field in &section.fields {
                let field_html = render_field(
                    field,
                    state.get_or_null(&field.name),
                    errors.get(&field.name),
                    settings,
                );
                fieldset = fieldset.child::<Div, _>(|d| d.raw(&field_html));
            }

            fieldset
        });
    }

    if status.is_success_visible() {
        form = form.child::<Div, _>(|d| {
            d.class("form-success")
                .attr("role", "status")
                .attr("aria-live", "polite")
                .child::<P, _>(|p| {
                    p.class("form-success-title")
                        .text(settings.success_title.as_str())
                })
                .child::<P, _>(|p| p.text(settings.success_body.as_str()))
        });
    }

    let button = render_submit_button(config, status.is_submitting(), settings);
    form = form.child::<Div, _>(|d| d.class("form-actions").raw(&button));

    html! { div.class("dynamic-form-container") }
        .raw(header.render())
        .raw(form.render())
        .render()
}

fn render_submit_button(config: &FormConfig, submitting: bool, settings: &FormSettings) -> String {
    if submitting {
        format!(
            concat!(
                r#"<button type="submit" class="btn btn-primary" "#,
                r#"disabled="disabled" aria-busy="true">{}</button>"#,
            ),
            html_escape(&settings.submitting_text)
        )
    } else {
        let label = config
            .submit_text
            .as_deref()
            .unwrap_or(&settings.submit_text);
        format!(
            r#"<button type="submit" class="btn btn-primary">{}</button>"#,
            html_escape(label)
        )
    }
}
