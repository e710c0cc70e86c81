//! The form controller: schema, state, errors and submission in one place.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{ErrorState, FormError, Result, SubmitError};
use crate::form::render_form;
use crate::schema::{FormConfig, FormField};
use crate::settings::FormSettings;
use crate::state::FormState;
use crate::submit::{
    PendingSubmit, SimulatedSubmit, SubmissionStatus, SubmitHandler, SubmitOutcome,
};
use crate::validation::{validate_field, validate_form};
use crate::value::{FieldValue, FormData};
use crate::widgets::{FieldEvent, FieldWidget, RawInput};

/// Owns the live state of one form.
///
/// Field controls report changes and blurs through [`on_change`] and
/// [`on_blur`] (or [`handle_event`]); [`submit`] runs the validate, deliver,
/// reset sequence.
///
/// [`on_change`]: FormController::on_change
/// [`on_blur`]: FormController::on_blur
/// [`handle_event`]: FormController::handle_event
/// [`submit`]: FormController::submit
pub struct FormController {
    config: FormConfig,
    settings: FormSettings,
    state: FormState,
    errors: ErrorState,
    status: SubmissionStatus,
    handler: Option<Arc<dyn SubmitHandler>>,
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("title", &self.config.title)
            .field("state", &self.state)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Checks the schema and initializes every field to its default.
    pub fn new(config: FormConfig) -> Result<Self> {
        config.check()?;
        let state = FormState::from_fields(config.fields());
        Ok(Self {
            config,
            settings: FormSettings::default(),
            state,
            errors: ErrorState::new(),
            status: SubmissionStatus::new(),
            handler: None,
        })
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: FormSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the handler that receives submitted data. Without one, submission
    /// uses [`SimulatedSubmit`].
    #[must_use]
    pub fn with_handler(mut self, handler: impl SubmitHandler + 'static) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Swaps in a new schema. All values go back to their defaults and all
    /// errors are cleared.
    pub fn load(&mut self, config: FormConfig) -> Result<()> {
        config.check()?;
        self.state = FormState::from_fields(config.fields());
        self.errors.clear_all();
        self.config = config;
        info!(title = %self.config.title, fields = self.state.len(), "schema loaded");
        Ok(())
    }

    /// Returns the schema.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Returns the settings.
    pub const fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// Returns the current values.
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Returns the current errors.
    pub const fn errors(&self) -> &ErrorState {
        &self.errors
    }

    /// Returns the current value of a field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.state.get(name)
    }

    /// Returns the current error of a field.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name)
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.status.is_submitting()
    }

    /// Returns whether the success message is shown.
    pub fn is_success_visible(&self) -> bool {
        self.status.is_success_visible()
    }

    /// Returns the first field with an error, in declaration order. This is
    /// the control that should receive focus after a failed submit.
    pub fn focus_target(&self) -> Option<&str> {
        self.errors.first_in(self.config.fields())
    }

    fn field(&self, name: &str) -> Result<&FormField> {
        self.config
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Records a new value and clears that field's error until it is
    /// validated again.
    pub fn on_change(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.field(name)?;
        let value = value.into();
        debug!(field = name, %value, "field changed");
        self.state.set(name, value);
        self.errors.clear(name);
        Ok(())
    }

    /// Validates one field against the value it reported on blur.
    pub fn on_blur(&mut self, name: &str, value: &FieldValue) -> Result<()> {
        let field = self.field(name)?;
        let message = validate_field(field, value, &self.settings.messages);
        debug!(field = name, error = ?message, "field blurred");
        self.errors.set(name, message);
        Ok(())
    }

    /// Applies an event reported by a field control.
    pub fn handle_event(&mut self, event: FieldEvent) -> Result<()> {
        match event {
            FieldEvent::Change { name, value } => self.on_change(&name, value),
            FieldEvent::Blur { name, value } => self.on_blur(&name, &value),
        }
    }

    fn coerce(field: &FormField, raw: RawInput) -> FieldValue {
        match FieldWidget::for_field(field) {
            Some(widget) => widget.coerce(raw),
            None => match raw {
                RawInput::Text(text) => FieldValue::Text(text),
                RawInput::Checked(checked) => FieldValue::Bool(checked),
            },
        }
    }

    /// Coerces raw control input through the field's widget and applies it
    /// as a change. Fields with an unknown type keep the input as is.
    pub fn input(&mut self, name: &str, raw: impl Into<RawInput>) -> Result<()> {
        let value = Self::coerce(self.field(name)?, raw.into());
        self.handle_event(FieldEvent::Change {
            name: name.to_string(),
            value,
        })
    }

    /// Coerces raw control input and validates it as a blur.
    pub fn blur(&mut self, name: &str, raw: impl Into<RawInput>) -> Result<()> {
        let value = Self::coerce(self.field(name)?, raw.into());
        self.handle_event(FieldEvent::Blur {
            name: name.to_string(),
            value,
        })
    }

    /// Sets several values at once, as if each had been changed by the user.
    ///
    /// Every name is checked first; on an unknown name nothing is applied.
    pub fn fill(&mut self, data: FormData) -> Result<()> {
        if let Some(name) = data.keys().find(|name| self.config.field(name).is_none()) {
            return Err(FormError::UnknownField(name.clone()));
        }
        for (name, value) in data {
            self.on_change(&name, value)?;
        }
        Ok(())
    }

    /// Runs validation over every field and replaces the error map.
    pub fn validate(&mut self) -> bool {
        self.errors = validate_form(self.config.fields(), &self.state, &self.settings.messages);
        self.errors.is_empty()
    }

    /// Validates, delivers and resets.
    ///
    /// Equivalent to [`begin_submit`](Self::begin_submit), then
    /// [`PendingSubmit::deliver`], then [`finish_submit`](Self::finish_submit).
    /// The submitting flag is cleared on every path, including when this
    /// future is dropped before completion.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let pending = match self.begin_submit() {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = pending.deliver().await;
        self.finish_submit(result)
    }

    /// Validates and marks the form as submitting.
    ///
    /// Returns the outcome directly when nothing is to be sent:
    /// [`SubmitOutcome::Busy`] while another submission is in flight, or
    /// [`SubmitOutcome::Invalid`] after replacing the error map. Otherwise the
    /// returned [`PendingSubmit`] carries a snapshot of the values and the
    /// handler (or [`SimulatedSubmit`] when none is set). Until it is
    /// delivered or dropped, [`is_submitting`](Self::is_submitting) is true
    /// and the rendered submit button is disabled.
    pub fn begin_submit(&mut self) -> std::result::Result<PendingSubmit, SubmitOutcome> {
        if self.status.is_submitting() {
            debug!("submit ignored, submission already in flight");
            return Err(SubmitOutcome::Busy);
        }

        if !self.validate() {
            let focus = self.focus_target().map(str::to_string);
            info!(
                errors = self.errors.len(),
                ?focus,
                "form validation failed before submission"
            );
            return Err(SubmitOutcome::Invalid { focus });
        }

        let in_flight = self.status.begin().ok_or(SubmitOutcome::Busy)?;
        self.status.hide_success();

        let handler: Arc<dyn SubmitHandler> = match &self.handler {
            Some(handler) => Arc::clone(handler),
            None => Arc::new(SimulatedSubmit::new(
                self.settings.simulated_submit_delay(),
            )),
        };
        Ok(PendingSubmit::new(self.state.snapshot(), handler, in_flight))
    }

    /// Applies the result of a delivered submission.
    ///
    /// On success the success message is shown for the configured time,
    /// values are reset to their defaults and all errors are cleared. On
    /// failure values and errors are left for the user to retry.
    pub fn finish_submit(
        &mut self,
        result: std::result::Result<(), SubmitError>,
    ) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.status.show_success(self.settings.success_display());
                self.state.reset_to_defaults(self.config.fields());
                self.errors.clear_all();
                info!("form submitted");
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                error!(error = %err, "submission error");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Renders the form in its current state.
    pub fn render(&self) -> String {
        render_form(
            &self.config,
            &self.state,
            &self.errors,
            &self.status,
            &self.settings,
        )
    }
}
