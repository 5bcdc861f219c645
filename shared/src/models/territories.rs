//! Sales rep territories
//!
//! The backend stores territories either as a JSON array or as a string
//! holding a serialized array. Both forms are normalized here, once, at
//! decode time.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Territories assigned to a sales rep
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Territories {
    /// Decoded list of region names
    List(Vec<String>),
    /// Free-form text that is not a serialized list
    Raw(String),
}

impl Territories {
    /// Normalize a textual territories field.
    ///
    /// A string holding a JSON array of strings decodes to `List`, a blank
    /// string to an empty `List`, anything else stays `Raw`.
    pub fn decode(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::List(Vec::new());
        }
        match serde_json::from_str::<Vec<String>>(text) {
            Ok(list) => Self::List(list),
            Err(_) => Self::Raw(text.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(list) => list.is_empty(),
            Self::Raw(text) => text.is_empty(),
        }
    }
}

impl Default for Territories {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl fmt::Display for Territories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(list) => f.write_str(&list.join(", ")),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TerritoriesWire {
    List(Vec<String>),
    Text(String),
}

impl<'de> Deserialize<'de> for Territories {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<TerritoriesWire>::deserialize(deserializer)? {
            None => Self::default(),
            Some(TerritoriesWire::List(list)) => Self::List(list),
            Some(TerritoriesWire::Text(text)) => Self::decode(&text),
        })
    }
}
