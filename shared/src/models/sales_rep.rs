//! Sales Rep Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Patch, Territories, patch_fields};

/// Sales representative entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRep {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Unique human-readable identifier
    pub code: String,
    #[serde(default)]
    pub territories: Territories,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub establishment_count: Option<i64>,
}

impl SalesRep {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Update sales rep payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesRepUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl SalesRepUpdate {
    /// Draft pre-filled with the editable fields of `rep`
    pub fn from_record(rep: &SalesRep) -> Self {
        Self {
            first_name: Some(rep.first_name.clone()),
            last_name: Some(rep.last_name.clone()),
            email: Some(rep.email.clone()),
            phone: Some(rep.phone.clone()),
        }
    }
}

impl Patch<SalesRep> for SalesRepUpdate {
    fn apply(&self, target: &mut SalesRep) {
        patch_fields!(self, target, [first_name, last_name, email, phone]);
    }

    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}
