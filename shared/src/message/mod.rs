//! Change events and live-socket messages
//!
//! The server publishes a [`ChangeEvent`] for every store write. Live
//! sockets answer each relevant event with a full [`LiveMessage::Snapshot`]
//! of the subscribed query, so clients always replace and never patch.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Named document collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    MenuItems,
    Gallery,
    Reservations,
    Preorders,
    UserRoles,
    Accounts,
    Contacts,
    Feedback,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MenuItems => "menu_items",
            Self::Gallery => "gallery",
            Self::Reservations => "reservations",
            Self::Preorders => "preorders",
            Self::UserRoles => "user_roles",
            Self::Accounts => "accounts",
            Self::Contacts => "contacts",
            Self::Feedback => "feedback",
        }
    }

    /// Collections the admin dashboard may watch live
    pub fn is_admin_watchable(&self) -> bool {
        matches!(self, Self::MenuItems | Self::Reservations | Self::Preorders)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collection: {0}")]
pub struct UnknownCollection(pub String);

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu_items" => Ok(Self::MenuItems),
            "gallery" => Ok(Self::Gallery),
            "reservations" => Ok(Self::Reservations),
            "preorders" => Ok(Self::Preorders),
            "user_roles" => Ok(Self::UserRoles),
            "accounts" => Ok(Self::Accounts),
            "contacts" => Ok(Self::Contacts),
            "feedback" => Ok(Self::Feedback),
            other => Err(UnknownCollection(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// One store write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub id: String,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(collection: Collection, id: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            collection,
            id: id.into(),
            kind,
        }
    }
}

/// Frame sent over a live socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveMessage {
    /// The full current result set of the subscribed query
    Snapshot {
        collection: Collection,
        documents: Vec<Value>,
    },
    /// The server gave up on this subscription
    Error { code: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names_round_trip() {
        for c in [
            Collection::MenuItems,
            Collection::Gallery,
            Collection::Reservations,
            Collection::Preorders,
            Collection::UserRoles,
            Collection::Accounts,
            Collection::Contacts,
            Collection::Feedback,
        ] {
            assert_eq!(c.as_str().parse::<Collection>(), Ok(c));
            assert_eq!(
                serde_json::to_value(c).unwrap(),
                Value::String(c.as_str().to_string())
            );
        }
    }

    #[test]
    fn test_admin_watchable() {
        assert!(Collection::Preorders.is_admin_watchable());
        assert!(!Collection::Accounts.is_admin_watchable());
        assert!(!Collection::UserRoles.is_admin_watchable());
    }

    #[test]
    fn test_live_message_wire_format() {
        let msg = LiveMessage::Snapshot {
            collection: Collection::Preorders,
            documents: vec![serde_json::json!({"id": "o-1"})],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "snapshot");
        assert_eq!(json["collection"], "preorders");
        assert_eq!(json["documents"][0]["id"], "o-1");
    }
}
