//! Marketplace roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the marketplace a visitor is on
///
/// Chosen once per form session. It decides which role-specific field is
/// required and which endpoint receives the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Wants to purchase treated water
    Buyer,
    /// Has treated water to supply
    Seller,
}

impl Role {
    /// All roles, in the order the selector presents them
    pub const ALL: [Role; 2] = [Role::Buyer, Role::Seller];

    /// Lowercase wire name (`"buyer"` / `"seller"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }

    /// Heading shown above the role's form
    pub fn form_title(&self) -> &'static str {
        match self {
            Role::Buyer => "Water Purchase Request",
            Role::Seller => "Water Supply Details",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names neither role
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
