//! Form fields and their formats

use crate::core::Role;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A named control on the lead form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Phone,
    Email,
    Quantity,
    Location,
    PinCode,
    DeliveryDate,
    SocietyName,
}

/// Fields required for every role, in error-reporting order
const COMMON_REQUIRED: [Field; 5] = [
    Field::Name,
    Field::Phone,
    Field::Quantity,
    Field::Location,
    Field::PinCode,
];

impl Field {
    /// Identifier used as the control name and error key
    pub fn id(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Quantity => "quantity",
            Field::Location => "location",
            Field::PinCode => "pinCode",
            Field::DeliveryDate => "deliveryDate",
            Field::SocietyName => "societyName",
        }
    }

    /// Human label derived from the identifier
    ///
    /// The identifier is split before each capital letter and its first
    /// letter is upper-cased: `pinCode` becomes `Pin Code`.
    pub fn label(&self) -> String {
        label_for(self.id())
    }

    /// The field only one role fills in
    pub fn role_specific(role: Role) -> Field {
        match role {
            Role::Buyer => Field::DeliveryDate,
            Role::Seller => Field::SocietyName,
        }
    }

    /// Every field that must be filled in for `role`
    pub fn required_for(role: Role) -> Vec<Field> {
        let mut fields = COMMON_REQUIRED.to_vec();
        fields.push(Field::role_specific(role));
        fields
    }

    /// Format the value must match when present
    pub fn format(&self) -> Option<FieldFormat> {
        match self {
            Field::Phone => Some(FieldFormat::Phone),
            Field::PinCode => Some(FieldFormat::PinCode),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Turn a camelCase identifier into a label
pub fn label_for(identifier: &str) -> String {
    let mut label = String::with_capacity(identifier.len() + 4);
    for (i, c) in identifier.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                label.push(' ');
            }
            label.push(c);
        }
    }
    label
}

/// Digit-only formats checked on non-empty values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Exactly 10 ASCII digits
    Phone,
    /// Exactly 6 ASCII digits (Indian postal code)
    PinCode,
}

impl FieldFormat {
    /// Check a raw value against this format
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Phone => Self::phone_regex().is_match(value),
            FieldFormat::PinCode => Self::pin_code_regex().is_match(value),
        }
    }

    /// Message reported when the value does not match
    pub fn message(&self) -> &'static str {
        match self {
            FieldFormat::Phone => "Please enter a valid 10-digit phone number",
            FieldFormat::PinCode => "Please enter a valid 6-digit PIN code",
        }
    }

    /// HTML `pattern` attribute mirroring the check
    pub fn html_pattern(&self) -> &'static str {
        match self {
            FieldFormat::Phone => "[0-9]{10}",
            FieldFormat::PinCode => "[0-9]{6}",
        }
    }

    // `\d` would accept any Unicode digit, so spell out the ASCII range.
    fn phone_regex() -> &'static Regex {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        PHONE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10}$").unwrap())
    }

    fn pin_code_regex() -> &'static Regex {
        static PIN_CODE_REGEX: OnceLock<Regex> = OnceLock::new();
        PIN_CODE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{6}$").unwrap())
    }
}
