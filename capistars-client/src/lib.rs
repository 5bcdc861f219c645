//! CAPISTARS Client - admin client for the CAPISTARS backend
//!
//! Provides the tRPC-over-HTTP adapter, the typed resource façade used by
//! the admin screens, and the operator session.

pub mod config;
pub mod error;
pub mod facade;
pub mod logger;
pub mod rpc;
pub mod session;
pub mod settings;
pub mod view;

pub use config::{ClientConfig, ProcedurePreset};
pub use error::{ClientError, ClientResult};
pub use facade::{Facade, Fetched, ProcedureTable, Resource};
pub use rpc::{CallKind, InputEncoding, NetworkRpcClient, RpcTransport};
pub use session::{Session, SessionError};
pub use settings::{Settings, SettingsStore};
pub use view::{LogFilter, ResourceList};

// Re-export shared types for convenience
pub use shared::models::{
    ActionKind, ActionLog, ActionRecord, Client, ClientUpdate, EntityKind, Establishment,
    EstablishmentUpdate, SalesRep, SalesRepUpdate, Stats, Territories,
};
