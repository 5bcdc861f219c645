//! Resource façade
//!
//! Typed operations over the tRPC adapter, one group per resource kind.
//! This is the only layer that recovers from failures: reads come back as
//! [`Fetched`], mutations as `bool`. No error detail crosses this boundary.

mod action_logs;
mod procedures;
mod resource;

pub use action_logs::ActionLogs;
pub use procedures::{LogProcedures, ProcedureTable, ResourceProcedures, StatsProcedures};
pub use resource::{Resource, ResourceApi};

use shared::models::{Client, Establishment, SalesRep, Stats};

use crate::rpc::{NetworkRpcClient, RpcTransport};
use crate::{ClientConfig, ClientResult};

/// Outcome of a read through the façade
///
/// Distinguishes an empty result from an unreachable backend while still
/// offering the safe default through [`Fetched::into_inner`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Fetched<T> {
    /// Backend answered with a well-formed payload
    Loaded(T),
    /// Transport, status or envelope failure
    Unavailable,
}

impl<T> Fetched<T> {
    pub(crate) fn from_result(procedure: &str, result: ClientResult<T>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(e) => {
                tracing::warn!(procedure, error = %e, "Read failed, falling back to default");
                Self::Unavailable
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    /// Loaded value, if any
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(data) => Some(data),
            Self::Unavailable => None,
        }
    }

    pub fn as_ref(&self) -> Fetched<&T> {
        match self {
            Self::Loaded(data) => Fetched::Loaded(data),
            Self::Unavailable => Fetched::Unavailable,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Self::Loaded(data) => Fetched::Loaded(f(data)),
            Self::Unavailable => Fetched::Unavailable,
        }
    }
}

impl<T: Default> Fetched<T> {
    /// Loaded value, or the default (empty list, all-zero stats) when unavailable
    pub fn into_inner(self) -> T {
        self.loaded().unwrap_or_default()
    }
}

/// Typed entry point over a tRPC transport
#[derive(Debug, Clone)]
pub struct Facade<R> {
    rpc: R,
    procedures: ProcedureTable,
}

impl Facade<NetworkRpcClient> {
    /// Build a network façade from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(
            config.build_rpc_client()?,
            config.procedures.table(),
        ))
    }
}

impl<R: RpcTransport> Facade<R> {
    pub fn new(rpc: R, procedures: ProcedureTable) -> Self {
        Self { rpc, procedures }
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn rpc_mut(&mut self) -> &mut R {
        &mut self.rpc
    }

    pub fn procedures(&self) -> &ProcedureTable {
        &self.procedures
    }

    /// Group for any resource kind
    pub fn resource<T: Resource>(&self) -> ResourceApi<'_, R, T> {
        ResourceApi::new(&self.rpc, &self.procedures)
    }

    pub fn sales_reps(&self) -> ResourceApi<'_, R, SalesRep> {
        self.resource()
    }

    pub fn establishments(&self) -> ResourceApi<'_, R, Establishment> {
        self.resource()
    }

    pub fn clients(&self) -> ResourceApi<'_, R, Client> {
        self.resource()
    }

    pub fn action_logs(&self) -> ActionLogs<'_, R> {
        ActionLogs::new(&self.rpc, self.procedures.action_logs)
    }

    /// Dashboard counters derived from the sales rep and establishment lists.
    ///
    /// Both lists are fetched concurrently from the resource routers
    /// (`salesReps.list`, `establishments.list`) under every preset. If either
    /// read fails the whole snapshot is `Unavailable`; partial counts are
    /// never reported.
    pub async fn stats(&self) -> Fetched<Stats> {
        let reps = self.procedures.stats.sales_reps;
        let establishments = self.procedures.stats.establishments;

        let result = tokio::try_join!(
            self.rpc.query::<Vec<SalesRep>, ()>(reps, None),
            self.rpc.query::<Vec<Establishment>, ()>(establishments, None),
        );

        Fetched::from_result(
            "stats",
            result.map(|(reps, establishments)| {
                Stats::from_activity(
                    reps.iter().map(|r| r.is_active),
                    establishments.iter().map(|e| e.is_active),
                )
            }),
        )
    }

    /// Counters computed by the backend itself
    pub async fn server_stats(&self) -> Fetched<Stats> {
        let server = self.procedures.stats.server;
        let result = self.rpc.query::<Stats, ()>(server, None).await;
        Fetched::from_result(server, result)
    }
}
