//! Staff roles and role lookup

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Back-office role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Chef,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Chef => "chef",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "chef" => Ok(Self::Chef),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Body of a `user_roles` document; the document id is the identity uid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    pub role: Role,
}

/// Outcome of looking up the role of a signed-in identity
///
/// The three outcomes are kept apart on purpose: a missing document and a
/// failed lookup are both "no access", never an implied role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoleLookup {
    Found { role: Role },
    NotFound,
    LookupError { message: String },
}

impl RoleLookup {
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Found { role } => Some(*role),
            _ => None,
        }
    }
}
