//! The inventory session: one owner for the store, the undo coordinator and the
//! table's search/sort state, driven by discrete UI events.

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity};
use stockroom_events::{Event, EventBus, InMemoryEventBus, Subscription};
use stockroom_inventory::{
    InventoryStore, Item, ItemDraft, ItemId, Report, ScheduledExpiry, SortDirection, SortField,
    SortState, UndoCoordinator, UndoError, UndoTicket, aggregate, filter_by_name, sort_by,
};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::notification::Notification;
use crate::seed;

/// Whether the item form creates a new item or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum FormMode {
    Add,
    Edit(ItemId),
}

#[derive(Debug)]
pub struct InventorySession<C: Clock = SystemClock> {
    store: InventoryStore,
    undo: UndoCoordinator,
    search_term: String,
    sort: SortState,
    pending_delete: Option<ItemId>,
    notifications: InMemoryEventBus<Notification>,
    clock: C,
}

impl InventorySession<SystemClock> {
    pub fn new(config: &SessionConfig) -> DomainResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> InventorySession<C> {
    /// Session over a fresh store, seeded per `config`.
    pub fn with_clock(config: &SessionConfig, clock: C) -> DomainResult<Self> {
        let seed = if config.seed_defaults {
            seed::default_items(clock.now())
        } else {
            Vec::new()
        };
        let store = InventoryStore::new().seeded(seed)?;
        Ok(Self::with_store(store, config, clock))
    }

    /// Session over a caller-built store.
    pub fn with_store(store: InventoryStore, config: &SessionConfig, clock: C) -> Self {
        tracing::info!(
            items = store.len(),
            undo_window_ms = config.undo_window.num_milliseconds(),
            "inventory session started"
        );
        Self {
            store,
            undo: UndoCoordinator::new(config.undo_window),
            search_term: String::new(),
            sort: SortState::default(),
            pending_delete: None,
            notifications: InMemoryEventBus::new(),
            clock,
        }
    }

    /// Receive every notification published from now on.
    pub fn subscribe(&self) -> Subscription<Notification> {
        self.notifications.subscribe()
    }

    // -- outputs ------------------------------------------------------------

    pub fn items(&self) -> &[Item] {
        self.store.list()
    }

    /// The table rows: search applied, then the active sort.
    pub fn filtered_sorted_items(&self) -> Vec<&Item> {
        let found = filter_by_name(self.store.list(), &self.search_term);
        sort_by(found, self.sort.field, self.sort.direction)
    }

    /// Report over the whole collection, regardless of the search term.
    pub fn report(&self) -> Report {
        aggregate(self.store.list())
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// The item awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<&Item> {
        self.pending_delete.as_ref().and_then(|id| self.store.get(id))
    }

    /// The deleted item that can still be brought back.
    pub fn pending_undo(&self) -> Option<&Item> {
        self.undo.pending()
    }

    pub fn scheduled_expiry(&self) -> Option<ScheduledExpiry> {
        self.undo.scheduled()
    }

    /// Pre-filled form values for editing `id`.
    pub fn edit_draft(&self, id: &ItemId) -> DomainResult<ItemDraft> {
        self.store
            .get(id)
            .map(ItemDraft::from_item)
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    // -- input events -------------------------------------------------------

    pub fn submit_item(&mut self, draft: &ItemDraft, mode: FormMode) -> DomainResult<Item> {
        let now = self.clock.now();
        let result = match &mode {
            FormMode::Add => {
                let reserved: Vec<ItemId> =
                    self.undo.pending().map(|item| item.id().clone()).into_iter().collect();
                self.store.add_reserving(draft, now, &reserved)
            }
            FormMode::Edit(id) => self.store.update(id, draft, now),
        };

        match &result {
            Ok(_) => self.flush_events(),
            Err(DomainError::Validation(errors)) => {
                self.publish(Notification::validation_failed(errors));
            }
            Err(DomainError::NotFound { .. }) => {
                if let FormMode::Edit(id) = &mode {
                    self.publish(Notification::not_found(id));
                }
            }
            Err(err) => tracing::warn!(error = %err, "item submission failed"),
        }
        result
    }

    /// Ask for confirmation before deleting `id`.
    pub fn request_delete(&mut self, id: &ItemId) -> DomainResult<&Item> {
        if self.store.get(id).is_none() {
            self.publish(Notification::not_found(id));
            return Err(DomainError::not_found(id.as_str()));
        }
        self.pending_delete = Some(id.clone());
        self.store
            .get(id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    /// Delete the item awaiting confirmation and open its undo window.
    ///
    /// `Ok(None)` when no delete was requested.
    pub fn confirm_delete(&mut self) -> DomainResult<Option<Item>> {
        let Some(id) = self.pending_delete.take() else {
            return Ok(None);
        };

        let now = self.clock.now();
        let removed = match self.store.remove(&id, now) {
            Ok(removed) => removed,
            Err(err) => {
                self.publish(Notification::not_found(&id));
                return Err(err);
            }
        };

        let item = removed.item().clone();
        self.undo.record_delete(removed, now);
        self.flush_events();
        Ok(Some(item))
    }

    pub fn cancel_delete(&mut self) -> Option<ItemId> {
        self.pending_delete.take()
    }

    /// Restore the most recently deleted item, if its window is still open.
    pub fn undo(&mut self) -> Result<Item, UndoError> {
        let now = self.clock.now();
        match self.undo.undo(&mut self.store, now) {
            Ok(item) => {
                self.flush_events();
                Ok(item)
            }
            Err(err) => {
                tracing::info!(error = %err, "undo unavailable");
                self.publish(Notification::undo_unavailable(&err));
                Err(err)
            }
        }
    }

    /// Timer callback for a `ScheduledExpiry`. Returns whether a snapshot was
    /// dropped; stale tickets do nothing.
    pub fn expire_undo(&mut self, ticket: UndoTicket) -> bool {
        self.undo.expire(ticket).is_some()
    }

    /// Drop the pending undo if its deadline has passed.
    pub fn tick(&mut self) -> bool {
        self.undo.expire_due(self.clock.now()).is_some()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort = SortState { field, direction };
    }

    /// Header click on `field`.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    fn flush_events(&mut self) {
        let expiry = self.undo.scheduled();
        for event in self.store.take_events() {
            tracing::debug!(
                event = event.event_type(),
                item_id = %event.item().id(),
                "publishing notification"
            );
            self.publish(Notification::for_event(&event, expiry));
        }
    }

    fn publish(&self, notification: Notification) {
        if let Err(err) = self.notifications.publish(notification) {
            tracing::warn!(error = ?err, "failed to publish notification");
        }
    }
}
