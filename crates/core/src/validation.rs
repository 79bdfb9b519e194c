//! Required-field checks for incoming request payloads.
//!
//! Request bodies deserialize every field as `Option`; [`take`] turns a
//! missing or blank value into a [`CoreError::Validation`] naming the field.
//! Callers check fields one after another so the first missing one is the
//! one reported.

use crate::error::CoreError;

/// Message reported when a required field is absent or empty.
pub fn missing_field_message(field: &str) -> String {
    format!("{field} must exist")
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Require that `value` is present and not blank, taking ownership of it.
pub fn take(field: &str, value: Option<String>) -> Result<String, CoreError> {
    match value {
        Some(v) if is_present(&v) => Ok(v),
        _ => Err(CoreError::Validation(missing_field_message(field))),
    }
}
