//! Engine settings.
//!
//! Timings and the fixed user-facing strings that do not come from the form
//! schema. Defaults match the Norwegian sample schema. Settings can be read
//! from a JSON file where every key is optional:
//!
//! ```json
//! {
//!     "simulatedSubmitDelayMs": 1500,
//!     "successDisplayMs": 3000,
//!     "messages": { "required": "This field is required." }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Messages produced by the validation engine itself rather than by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationMessages {
    /// Used when `required: true` carries no message of its own.
    pub required: String,
    /// Used when a number field holds something that is not a number.
    pub invalid_number: String,
}

impl Default for ValidationMessages {
    fn default() -> Self {
        Self {
            required: "Feltet er påkrevd".to_string(),
            invalid_number: "Må være et gyldig tall.".to_string(),
        }
    }
}

impl ValidationMessages {
    /// English messages.
    pub fn english() -> Self {
        Self {
            required: "This field is required.".to_string(),
            invalid_number: "Must be a valid number.".to_string(),
        }
    }
}

/// Settings for a form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormSettings {
    /// How long the built-in submit placeholder waits, in milliseconds.
    pub simulated_submit_delay_ms: u64,
    /// How long the success message stays visible, in milliseconds.
    pub success_display_ms: u64,
    /// Submit button label when the schema gives none.
    pub submit_text: String,
    /// Submit button label while a submission is in flight.
    pub submitting_text: String,
    /// Label of the blank select option when the field has no placeholder.
    pub select_placeholder: String,
    /// Success message heading.
    pub success_title: String,
    /// Success message body.
    pub success_body: String,
    /// Prefix of the placeholder shown for unknown field types.
    pub unknown_type_label: String,
    /// Validation engine messages.
    pub messages: ValidationMessages,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            simulated_submit_delay_ms: 1500,
            success_display_ms: 3000,
            submit_text: "Send inn".to_string(),
            submitting_text: "Sender inn...".to_string(),
            select_placeholder: "Velg...".to_string(),
            success_title: "Skjema sendt inn!".to_string(),
            success_body: "Tusen takk for din interesse. Vi kontakter deg snart.".to_string(),
            unknown_type_label: "Ukjent felttype:".to_string(),
            messages: ValidationMessages::default(),
        }
    }
}

impl FormSettings {
    /// Parses settings from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Delay of the built-in submit placeholder.
    pub const fn simulated_submit_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_submit_delay_ms)
    }

    /// How long the success message stays visible.
    pub const fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FormSettings::default();
        assert_eq!(settings.simulated_submit_delay(), Duration::from_millis(1500));
        assert_eq!(settings.success_display(), Duration::from_secs(3));
        assert_eq!(settings.messages.required, "Feltet er påkrevd");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = FormSettings::from_json(
            r#"{ "successDisplayMs": 500, "messages": { "required": "Required" } }"#,
        )
        .unwrap();
        assert_eq!(settings.success_display_ms, 500);
        assert_eq!(settings.simulated_submit_delay_ms, 1500);
        assert_eq!(settings.messages.required, "Required");
        assert_eq!(settings.messages.invalid_number, "Må være et gyldig tall.");
        assert_eq!(settings.submit_text, "Send inn");
    }
}
