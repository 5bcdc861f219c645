//! Establishment Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Patch, patch_fields};

/// Establishment entity (a partner salon)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Establishment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub is_active: bool,
    /// Weak reference to the assigned sales rep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_rep_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update establishment payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl EstablishmentUpdate {
    pub fn from_record(est: &Establishment) -> Self {
        Self {
            name: Some(est.name.clone()),
            email: Some(est.email.clone()),
            phone: Some(est.phone.clone()),
            address: Some(est.address.clone()),
            city: Some(est.city.clone()),
        }
    }
}

impl Patch<Establishment> for EstablishmentUpdate {
    fn apply(&self, target: &mut Establishment) {
        patch_fields!(self, target, [name, email, phone, address, city]);
    }

    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
    }
}
