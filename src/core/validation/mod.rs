//! Lead form validation
//!
//! [`validate`] is a pure function of the raw values and the role. It checks
//! that every required field is filled in and that phone number and PIN code
//! have the right shape. Email is free text and never checked.

pub mod validators;

use crate::core::form::RawFormValues;
use crate::core::{Field, Role};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validators::{matches_format, required};

/// Per-field validation messages, keyed by field identifier
///
/// A field without an entry is valid. Entries keep the order in which the
/// rules reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field.id().to_string(), message.into());
    }

    /// Message for `field`, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(field.id()).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(field.id())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Check `values` against the rules for `role`
pub fn validate(values: &RawFormValues, role: Role) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required_fields = Field::required_for(role);

    let is_required = required();
    for &field in &required_fields {
        if let Err(message) = is_required(field, values.filled(field)) {
            errors.insert(field, message);
        }
    }

    let formatted = required_fields
        .iter()
        .filter_map(|&field| field.format().map(|format| (field, format)));
    for (field, format) in formatted {
        if let Err(message) = matches_format(format)(field, values.filled(field)) {
            errors.insert(field, message);
        }
    }

    errors
}
