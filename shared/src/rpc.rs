//! tRPC envelope types
//!
//! Every procedure, query or mutation, answers with the same wrapper:
//! ```json
//! {
//!     "result": {
//!         "data": { ... }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Response envelope of a tRPC procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcEnvelope<T> {
    pub result: RpcResult<T>,
}

/// Inner `result` object of the envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResult<T> {
    pub data: T,
}

impl<T> RpcEnvelope<T> {
    /// Wrap a value the way the backend does
    pub fn new(data: T) -> Self {
        Self {
            result: RpcResult { data },
        }
    }

    /// Unwrap the payload
    pub fn into_data(self) -> T {
        self.result.data
    }
}

/// Mutation input carrying an entity id next to its flattened fields
#[derive(Debug, Clone, Serialize)]
pub struct WithId<'a, T: Serialize> {
    pub id: i64,
    #[serde(flatten)]
    pub fields: &'a T,
}

/// `{ id }` input of delete mutations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IdInput {
    pub id: i64,
}

/// `{ id, isActive }` input of toggle mutations
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveInput {
    pub id: i64,
    pub is_active: bool,
}
