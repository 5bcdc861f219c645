//! Client Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Patch;

/// Client entity (a marketplace customer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    /// Weak reference to the backend-owned user account
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// CAPIMILES loyalty balance
    pub capimiles_points: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update client payload
///
/// `email` and `phone` can be set but not cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capimiles_points: Option<i64>,
}

impl ClientUpdate {
    pub fn from_record(client: &Client) -> Self {
        Self {
            first_name: Some(client.first_name.clone()),
            last_name: Some(client.last_name.clone()),
            email: client.email.clone(),
            phone: client.phone.clone(),
            capimiles_points: Some(client.capimiles_points),
        }
    }
}

impl Patch<Client> for ClientUpdate {
    fn apply(&self, target: &mut Client) {
        if let Some(first_name) = &self.first_name {
            target.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            target.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            target.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            target.phone = Some(phone.clone());
        }
        if let Some(points) = self.capimiles_points {
            target.capimiles_points = points;
        }
    }

    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.capimiles_points.is_none()
    }
}
