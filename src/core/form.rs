//! Raw and typed form values
//!
//! Controls hand us a loose string map ([`RawFormValues`]). Once it passes
//! validation it is lifted into [`FormValues`], one explicit struct per role,
//! so nothing downstream looks fields up by name.

use crate::core::validation::{FieldErrors, validate};
use crate::core::{Field, Role};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field name to raw string value, as captured from the controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFormValues(IndexMap<String, String>);

impl RawFormValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value by control name, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field.id(), value);
        self
    }

    /// Raw value for a control name, empty or not
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of `field` if it was filled in
    ///
    /// An empty string counts as missing. Whitespace is kept as entered.
    pub fn filled(&self, field: Field) -> Option<&str> {
        self.get(field.id()).filter(|v| !v.is_empty())
    }

    /// Drop every value
    pub fn clear(&mut self) {
        self.0.clear();
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

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawFormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<IndexMap<String, String>> for RawFormValues {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

/// Fields shared by both roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    /// Empty when not provided
    pub email: String,
    pub quantity: String,
    pub location: String,
    pub pin_code: String,
}

/// A validated purchase request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerFormValues {
    pub contact: ContactDetails,
    pub delivery_date: String,
}

/// A validated supply offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerFormValues {
    pub contact: ContactDetails,
    pub society_name: String,
}

/// Validated form values, tagged by role
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValues {
    Buyer(BuyerFormValues),
    Seller(SellerFormValues),
}

impl FormValues {
    /// Validate `raw` for `role` and lift it into typed values
    pub fn parse(raw: &RawFormValues, role: Role) -> Result<Self, FieldErrors> {
        let errors = validate(raw, role);
        if !errors.is_empty() {
            return Err(errors);
        }

        let take = |field: Field| raw.get(field.id()).unwrap_or_default().to_string();
        let contact = ContactDetails {
            name: take(Field::Name),
            phone: take(Field::Phone),
            email: take(Field::Email),
            quantity: take(Field::Quantity),
            location: take(Field::Location),
            pin_code: take(Field::PinCode),
        };

        Ok(match role {
            Role::Buyer => FormValues::Buyer(BuyerFormValues {
                contact,
                delivery_date: take(Field::DeliveryDate),
            }),
            Role::Seller => FormValues::Seller(SellerFormValues {
                contact,
                society_name: take(Field::SocietyName),
            }),
        })
    }

    pub fn role(&self) -> Role {
        match self {
            FormValues::Buyer(_) => Role::Buyer,
            FormValues::Seller(_) => Role::Seller,
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            FormValues::Buyer(b) => &b.contact,
            FormValues::Seller(s) => &s.contact,
        }
    }
}
