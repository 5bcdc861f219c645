//! Local list state of a management screen
//!
//! A [`ResourceList`] holds the copy of a collection fetched for one
//! screen visit. It changes only after the backend confirmed a mutation,
//! and at most one record is in edit mode at a time.

use shared::models::{ActionKind, ActionLog, ActionRecord, EntityKind, Patch};

use crate::facade::{Facade, Fetched, Resource};
use crate::rpc::RpcTransport;
use crate::{ClientError, ClientResult};

/// Case-insensitive substring match; an empty search matches everything.
pub fn matches_search(haystack: &str, search: &str) -> bool {
    let search = search.trim();
    search.is_empty() || haystack.to_lowercase().contains(&search.to_lowercase())
}

/// Entity filter of the action log screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogFilter {
    #[default]
    All,
    Only(EntityKind),
}

impl LogFilter {
    pub fn accepts(&self, kind: &EntityKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == kind,
        }
    }
}

/// Action log entries matching both the text search and the entity filter
pub fn filter_logs<'a>(logs: &'a [ActionLog], search: &str, filter: &LogFilter) -> Vec<&'a ActionLog> {
    logs.iter()
        .filter(|log| {
            let haystack = format!("{} {} {}", log.entity_name, log.performed_by, log.action);
            matches_search(&haystack, search) && filter.accepts(&log.entity_type)
        })
        .collect()
}

/// Load state of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    NotLoaded,
    Loaded,
    /// Last refresh could not reach the backend
    Unavailable,
}

/// Record currently being edited
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft<U> {
    pub id: i64,
    pub fields: U,
}

/// Cached collection of one resource kind
#[derive(Debug, Clone)]
pub struct ResourceList<T: Resource> {
    items: Vec<T>,
    status: ListStatus,
    editing: Option<EditDraft<T::Update>>,
    audit: bool,
}

impl<T: Resource> Default for ResourceList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> ResourceList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            status: ListStatus::NotLoaded,
            editing: None,
            audit: false,
        }
    }

    /// Record confirmed mutations in the action log
    pub fn with_audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Records matching `search`, in list order
    pub fn filtered(&self, search: &str) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| matches_search(&item.search_text(), search))
            .collect()
    }

    /// Replace the cached items with a fresh listing.
    ///
    /// An unreachable backend empties the list and marks it `Unavailable`.
    pub async fn refresh<R: RpcTransport>(&mut self, facade: &Facade<R>) -> ListStatus {
        match facade.resource::<T>().list().await {
            Fetched::Loaded(items) => {
                self.items = items;
                self.status = ListStatus::Loaded;
            }
            Fetched::Unavailable => {
                self.items.clear();
                self.status = ListStatus::Unavailable;
            }
        }
        self.status
    }

    /// Flip the active flag of record `id`
    pub async fn toggle<R: RpcTransport>(&mut self, facade: &Facade<R>, id: i64) -> bool {
        let Some(current) = self.get(id).map(Resource::is_active) else {
            return false;
        };
        if !facade.resource::<T>().toggle_active(id, current).await {
            return false;
        }

        let Some(item) = self.get_mut(id) else {
            return true;
        };
        item.set_active(!current);
        let name = item.display_name();
        self.audit(facade, ActionKind::for_active(!current), id, name)
            .await;
        true
    }

    /// Delete record `id` and drop it from the list
    pub async fn delete<R: RpcTransport>(&mut self, facade: &Facade<R>, id: i64) -> bool {
        let Some(name) = self.get(id).map(Resource::display_name) else {
            return false;
        };
        if !facade.resource::<T>().delete(id).await {
            return false;
        }

        self.items.retain(|item| item.id() != id);
        if self.editing.as_ref().is_some_and(|draft| draft.id == id) {
            self.editing = None;
        }
        self.audit(facade, ActionKind::Delete, id, name).await;
        true
    }

    /// Enter edit mode for record `id`, replacing any previous draft
    pub fn begin_edit(&mut self, id: i64) -> bool {
        match self.get(id) {
            Some(item) => {
                self.editing = Some(EditDraft {
                    id,
                    fields: item.edit_draft(),
                });
                true
            }
            None => false,
        }
    }

    pub fn editing(&self) -> Option<&EditDraft<T::Update>> {
        self.editing.as_ref()
    }

    /// Fields of the current draft
    pub fn draft_mut(&mut self) -> Option<&mut T::Update> {
        self.editing.as_mut().map(|draft| &mut draft.fields)
    }

    /// Set one field of the current draft by its wire name
    pub fn set_draft_field(&mut self, field: &str, value: &str) -> ClientResult<()> {
        let draft = self.draft_mut().ok_or_else(|| ClientError::InvalidField {
            field: field.to_string(),
            reason: "no record is being edited".to_string(),
        })?;
        T::assign_field(draft, field, value)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the draft; on success merge it into the cached record and leave
    /// edit mode. On failure the draft is kept.
    pub async fn save_edit<R: RpcTransport>(&mut self, facade: &Facade<R>) -> bool {
        let Some(draft) = self.editing.clone() else {
            return false;
        };
        if !facade.resource::<T>().update(draft.id, &draft.fields).await {
            return false;
        }

        self.editing = None;
        let Some(item) = self.get_mut(draft.id) else {
            return true;
        };
        draft.fields.apply(item);
        let name = item.display_name();
        self.audit(facade, ActionKind::Update, draft.id, name).await;
        true
    }

    async fn audit<R: RpcTransport>(
        &self,
        facade: &Facade<R>,
        action: ActionKind,
        entity_id: i64,
        entity_name: String,
    ) {
        if !self.audit {
            return;
        }
        let record = ActionRecord {
            action,
            entity_type: T::KIND,
            entity_id,
            entity_name,
        };
        // Audit failures never undo a confirmed mutation
        facade.action_logs().record(&record).await;
    }
}
