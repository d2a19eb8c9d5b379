//! How contacts are recorded when an item is aligned against another.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Which part of the touching sides is marked as a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMode {
    /// The entire sides are touching.
    FullContact,
    /// Only the overlapping part of the sides is touching.
    RangeContact,
    /// Nothing is recorded.
    NoContact,
}

impl ContactMode {
    /// Lenient conversion from the textual name. Unknown names give
    /// `NoContact`.
    pub fn from_string(s: &str) -> Self {
        s.parse().unwrap_or(ContactMode::NoContact)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMode::FullContact => "full_contact",
            ContactMode::RangeContact => "range_contact",
            ContactMode::NoContact => "no_contact",
        }
    }
}

impl FromStr for ContactMode {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_contact" => Ok(ContactMode::FullContact),
            "range_contact" => Ok(ContactMode::RangeContact),
            "no_contact" => Ok(ContactMode::NoContact),
            _ => Err(PhysicsError::UnknownContactMode(s.to_owned())),
        }
    }
}

impl fmt::Display for ContactMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The policy applied by the alignment step of a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionAlignPolicy {
    contact_mode: ContactMode,
}

impl CollisionAlignPolicy {
    pub fn new(contact_mode: ContactMode) -> Self {
        CollisionAlignPolicy { contact_mode }
    }

    pub fn contact_mode(&self) -> ContactMode {
        self.contact_mode
    }
}

impl Default for CollisionAlignPolicy {
    fn default() -> Self {
        CollisionAlignPolicy::new(ContactMode::FullContact)
    }
}

impl From<ContactMode> for CollisionAlignPolicy {
    fn from(contact_mode: ContactMode) -> Self {
        CollisionAlignPolicy::new(contact_mode)
    }
}
