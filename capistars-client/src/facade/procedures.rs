//! Procedure names per operation
//!
//! The backend exposes two families of routers: resource routers
//! (`salesReps.*`, `establishments.*`) and the `admin.*` router.

/// Procedures backing one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceProcedures {
    pub list: &'static str,
    pub update: &'static str,
    pub toggle: &'static str,
    pub delete: &'static str,
}

/// Procedures backing the action log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogProcedures {
    pub list: &'static str,
    pub record: &'static str,
}

/// Procedures backing the dashboard counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsProcedures {
    /// Listing the derived counters are computed from
    pub sales_reps: &'static str,
    pub establishments: &'static str,
    /// Counters computed by the backend
    pub server: &'static str,
}

/// Procedure names used by the façade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcedureTable {
    pub sales_reps: ResourceProcedures,
    pub establishments: ResourceProcedures,
    pub clients: ResourceProcedures,
    pub action_logs: LogProcedures,
    pub stats: StatsProcedures,
}

const CLIENTS: ResourceProcedures = ResourceProcedures {
    list: "admin.listClients",
    update: "admin.updateClient",
    toggle: "admin.toggleClient",
    delete: "admin.deleteClient",
};

// Same sources under every preset
const STATS: StatsProcedures = StatsProcedures {
    sales_reps: "salesReps.list",
    establishments: "establishments.list",
    server: "admin.getStats",
};

const ACTION_LOGS: LogProcedures = LogProcedures {
    list: "admin.getActionLogs",
    record: "admin.logAction",
};

impl ProcedureTable {
    /// `admin.*` router for establishments, `salesReps.getAll` listing
    pub fn admin() -> Self {
        Self {
            sales_reps: ResourceProcedures {
                list: "salesReps.getAll",
                ..Self::default().sales_reps
            },
            establishments: ResourceProcedures {
                list: "admin.listEstablishments",
                update: "admin.updateEstablishment",
                toggle: "admin.toggleEstablishment",
                delete: "admin.deleteEstablishment",
            },
            ..Self::default()
        }
    }
}

impl Default for ProcedureTable {
    fn default() -> Self {
        Self {
            sales_reps: ResourceProcedures {
                list: "salesReps.list",
                update: "salesReps.update",
                toggle: "salesReps.toggleActive",
                delete: "salesReps.delete",
            },
            // Establishments have no dedicated toggle; the flag goes through update
            establishments: ResourceProcedures {
                list: "establishments.list",
                update: "establishments.update",
                toggle: "establishments.update",
                delete: "establishments.delete",
            },
            clients: CLIENTS,
            action_logs: ACTION_LOGS,
            stats: STATS,
        }
    }
}
