//! Action log façade group

use serde_json::Value;
use shared::models::{ActionLog, ActionRecord};

use super::{Fetched, LogProcedures};
use crate::rpc::RpcTransport;

/// Façade group for the append-only action log
pub struct ActionLogs<'a, R> {
    rpc: &'a R,
    procedures: LogProcedures,
}

impl<'a, R: RpcTransport> ActionLogs<'a, R> {
    pub(crate) fn new(rpc: &'a R, procedures: LogProcedures) -> Self {
        Self { rpc, procedures }
    }

    /// Fetch the log, in backend order
    pub async fn list(&self) -> Fetched<Vec<ActionLog>> {
        let result = self
            .rpc
            .query::<Vec<ActionLog>, ()>(self.procedures.list, None)
            .await;
        Fetched::from_result(self.procedures.list, result)
    }

    /// Append an entry. The operator is identified by the backend from the
    /// session token, not by the payload.
    pub async fn record(&self, record: &ActionRecord) -> bool {
        tracing::info!(
            action = %record.action,
            entity_type = %record.entity_type,
            entity_id = record.entity_id,
            entity_name = %record.entity_name,
            "Action logged"
        );

        match self
            .rpc
            .mutate::<Value, ActionRecord>(self.procedures.record, record)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(procedure = self.procedures.record, error = %e, "Failed to record action");
                false
            }
        }
    }
}
