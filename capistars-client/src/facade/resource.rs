//! Per-resource façade groups
//!
//! Sales reps, establishments and clients share one operation shape:
//! list, update, toggle the active flag, delete.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    Client, ClientUpdate, EntityKind, Establishment, EstablishmentUpdate, Patch, SalesRep,
    SalesRepUpdate,
};
use shared::rpc::{ActiveInput, IdInput, WithId};

use super::{Fetched, ProcedureTable, ResourceProcedures};
use crate::rpc::RpcTransport;
use crate::{ClientError, ClientResult};

/// A backend-owned record the panel lists and edits
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Editable subset of the record
    type Update: Patch<Self> + Serialize + Clone + Send + Sync;

    /// Entity kind recorded in the action log
    const KIND: EntityKind;

    fn id(&self) -> i64;

    fn is_active(&self) -> bool;

    fn set_active(&mut self, is_active: bool);

    /// Name shown in lists and audit entries
    fn display_name(&self) -> String;

    /// Text the list search box matches against
    fn search_text(&self) -> String;

    /// Edit draft pre-filled from the record
    fn edit_draft(&self) -> Self::Update;

    /// Set one draft field by its wire name (`firstName`, `city`, ...)
    fn assign_field(draft: &mut Self::Update, field: &str, value: &str) -> ClientResult<()>;

    /// Procedures backing this resource
    fn procedures(table: &ProcedureTable) -> &ResourceProcedures;
}

impl Resource for SalesRep {
    type Update = SalesRepUpdate;
    const KIND: EntityKind = EntityKind::SalesRep;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.first_name, self.last_name, self.email, self.code
        )
    }

    fn edit_draft(&self) -> SalesRepUpdate {
        SalesRepUpdate::from_record(self)
    }

    fn assign_field(draft: &mut SalesRepUpdate, field: &str, value: &str) -> ClientResult<()> {
        let slot = match field {
            "firstName" => &mut draft.first_name,
            "lastName" => &mut draft.last_name,
            "email" => &mut draft.email,
            "phone" => &mut draft.phone,
            _ => return Err(unknown_field(field)),
        };
        *slot = Some(value.to_string());
        Ok(())
    }

    fn procedures(table: &ProcedureTable) -> &ResourceProcedures {
        &table.sales_reps
    }
}

impl Resource for Establishment {
    type Update = EstablishmentUpdate;
    const KIND: EntityKind = EntityKind::Establishment;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.email, self.city, self.postal_code
        )
    }

    fn edit_draft(&self) -> EstablishmentUpdate {
        EstablishmentUpdate::from_record(self)
    }

    fn assign_field(draft: &mut EstablishmentUpdate, field: &str, value: &str) -> ClientResult<()> {
        let slot = match field {
            "name" => &mut draft.name,
            "email" => &mut draft.email,
            "phone" => &mut draft.phone,
            "address" => &mut draft.address,
            "city" => &mut draft.city,
            _ => return Err(unknown_field(field)),
        };
        *slot = Some(value.to_string());
        Ok(())
    }

    fn procedures(table: &ProcedureTable) -> &ResourceProcedures {
        &table.establishments
    }
}

impl Resource for Client {
    type Update = ClientUpdate;
    const KIND: EntityKind = EntityKind::Client;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.first_name,
            self.last_name,
            self.email.as_deref().unwrap_or_default(),
            self.phone.as_deref().unwrap_or_default()
        )
    }

    fn edit_draft(&self) -> ClientUpdate {
        ClientUpdate::from_record(self)
    }

    fn assign_field(draft: &mut ClientUpdate, field: &str, value: &str) -> ClientResult<()> {
        let slot = match field {
            "capimilesPoints" => {
                let points = value.trim().parse().map_err(|_| ClientError::InvalidField {
                    field: field.to_string(),
                    reason: format!("{value:?} is not an integer"),
                })?;
                draft.capimiles_points = Some(points);
                return Ok(());
            }
            "firstName" => &mut draft.first_name,
            "lastName" => &mut draft.last_name,
            "email" => &mut draft.email,
            "phone" => &mut draft.phone,
            _ => return Err(unknown_field(field)),
        };
        *slot = Some(value.to_string());
        Ok(())
    }

    fn procedures(table: &ProcedureTable) -> &ResourceProcedures {
        &table.clients
    }
}

fn unknown_field(field: &str) -> ClientError {
    ClientError::InvalidField {
        field: field.to_string(),
        reason: "not editable".to_string(),
    }
}

/// Façade group for one resource kind
pub struct ResourceApi<'a, R, T> {
    rpc: &'a R,
    procedures: ResourceProcedures,
    _resource: PhantomData<fn() -> T>,
}

impl<'a, R: RpcTransport, T: Resource> ResourceApi<'a, R, T> {
    pub(crate) fn new(rpc: &'a R, table: &ProcedureTable) -> Self {
        Self {
            rpc,
            procedures: *T::procedures(table),
            _resource: PhantomData,
        }
    }

    pub fn procedures(&self) -> &ResourceProcedures {
        &self.procedures
    }

    /// Fetch every record, in backend order
    pub async fn list(&self) -> Fetched<Vec<T>> {
        let result = self.rpc.query::<Vec<T>, ()>(self.procedures.list, None).await;
        Fetched::from_result(self.procedures.list, result)
    }

    /// Send the edited fields of record `id`
    pub async fn update(&self, id: i64, update: &T::Update) -> bool {
        self.mutation(self.procedures.update, &WithId { id, fields: update })
            .await
    }

    /// Set the active flag of record `id` to exactly `is_active`
    pub async fn set_active(&self, id: i64, is_active: bool) -> bool {
        self.mutation(self.procedures.toggle, &ActiveInput { id, is_active })
            .await
    }

    /// Flip the active flag of record `id`, given its current value
    pub async fn toggle_active(&self, id: i64, currently_active: bool) -> bool {
        self.set_active(id, !currently_active).await
    }

    pub async fn delete(&self, id: i64) -> bool {
        self.mutation(self.procedures.delete, &IdInput { id }).await
    }

    async fn mutation<I: Serialize + Sync>(&self, procedure: &str, input: &I) -> bool {
        match self.rpc.mutate::<Value, I>(procedure, input).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(procedure, entity = %T::KIND, error = %e, "Mutation failed");
                false
            }
        }
    }
}
