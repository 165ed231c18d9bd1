//! Bridging `validator` derive results into [`CoreError::Validation`].

use validator::Validate;

use crate::error::CoreError;

/// Run `validator` rules on an input DTO.
///
/// Only the first failing field (alphabetically, so responses are stable)
/// is reported.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    let Err(errors) = input.validate() else {
        return Ok(());
    };

    let field_errors = errors.field_errors();
    let mut fields: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
    fields.sort();

    let Some(field) = fields.into_iter().next() else {
        return Err(CoreError::validation("input", "Invalid input"));
    };

    let message = field_errors
        .iter()
        .find(|(k, _)| k.to_string() == field)
        .and_then(|(_, errs)| errs.first())
        .map(|e| match &e.message {
            Some(msg) => msg.to_string(),
            None => format!("Invalid value ({})", e.code),
        })
        .unwrap_or_else(|| "Invalid value".to_string());

    Err(CoreError::Validation { field, message })
}

/// Reject empty or whitespace-only required text.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(field, "This field is required"));
    }
    Ok(())
}
