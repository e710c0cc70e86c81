//! Runtime field values.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The value held by a single form field.
///
/// One variant per runtime shape the field types produce: text-like fields
/// and selects hold `Text`, number fields hold `Number` or `Null`, checkboxes
/// hold `Bool`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String value (text, email, tel, select, textarea).
    Text(String),
    /// Numeric value. May be NaN when the raw input did not parse.
    Number(f64),
    /// Checkbox state.
    Bool(bool),
    /// No value.
    #[default]
    Null,
}

/// Field name to value map handed to submit handlers.
pub type FormData = HashMap<String, FieldValue>;

impl FieldValue {
    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns whether the value counts as empty.
    ///
    /// `Null`, `""`, `false` and zero are empty. NaN is not, so an
    /// unparsable number still reaches validation.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(b) => !b,
            Self::Number(n) => *n == 0.0,
        }
    }

    /// Returns whether the value is missing for the purpose of a required
    /// check on a non-checkbox field.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the string contents, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the checkbox state. Anything other than `Bool(true)` is
    /// unchecked.
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Bool(true))
    }

    /// Coerces the value to a number.
    ///
    /// Strings are trimmed before parsing and a whitespace-only string is 0.
    /// Booleans map to 1 and 0. Anything unparsable is NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Null => f64::NAN,
        }
    }

    /// Returns the string placed in a control's `value` attribute.
    pub fn display_value(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) if n.is_nan() => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Null => String::new(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            other => f.write_str(&other.display_value()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
