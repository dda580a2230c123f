//! Reusable field validators
//!
//! Each validator receives the field and its filled-in value (`None` when
//! the control was left empty) and returns the message to show on failure.

use crate::core::field::{Field, FieldFormat};

/// Validator: field must be filled in
pub fn required() -> impl Fn(Field, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    |field: Field, value: Option<&str>| match value {
        Some(_) => Ok(()),
        None => Err(format!("{} is required", field.label())),
    }
}

/// Validator: a filled-in value must match `format`
///
/// Empty values pass; [`required`] reports those.
pub fn matches_format(
    format: FieldFormat,
) -> impl Fn(Field, Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |_: Field, value: Option<&str>| match value {
        Some(v) if !format.matches(v) => Err(format.message().to_string()),
        _ => Ok(()),
    }
}
