//! Action Log Model
//!
//! Append-only audit trail of administrative mutations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of administrative action
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    Activate,
    Deactivate,
    Delete,
    Update,
    /// Vocabulary added by the backend after this client was built
    Other(String),
}

impl ActionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Other(other) => other,
        }
    }

    /// Action recorded when an entity's active flag is set to `is_active`
    pub fn for_active(is_active: bool) -> Self {
        if is_active {
            Self::Activate
        } else {
            Self::Deactivate
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "activate" => Self::Activate,
            "deactivate" => Self::Deactivate,
            "delete" => Self::Delete,
            "update" => Self::Update,
            _ => Self::Other(value),
        }
    }
}

impl From<ActionKind> for String {
    fn from(value: ActionKind) -> Self {
        match value {
            ActionKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an action targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityKind {
    SalesRep,
    Establishment,
    Client,
    Other(String),
}

impl EntityKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SalesRep => "salesRep",
            Self::Establishment => "establishment",
            Self::Client => "client",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for EntityKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "salesRep" => Self::SalesRep,
            "establishment" => Self::Establishment,
            "client" => Self::Client,
            _ => Self::Other(value),
        }
    }
}

impl From<EntityKind> for String {
    fn from(value: EntityKind) -> Self {
        match value {
            EntityKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit log entry, immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLog {
    pub id: i64,
    pub action: ActionKind,
    pub entity_type: EntityKind,
    pub entity_id: i64,
    pub entity_name: String,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

/// Payload sent to record a new action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub action: ActionKind,
    pub entity_type: EntityKind,
    pub entity_id: i64,
    pub entity_name: String,
}
