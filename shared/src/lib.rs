//! Shared types for the CAPISTARS admin client
//!
//! Entity records, partial-update payloads and the tRPC envelope used
//! between the backend and `capistars-client`.

pub mod models;
pub mod rpc;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    ActionKind, ActionLog, ActionRecord, Client, ClientUpdate, EntityKind, Establishment,
    EstablishmentUpdate, Patch, SalesRep, SalesRepUpdate, Stats, Territories,
};
pub use rpc::{RpcEnvelope, RpcResult};
