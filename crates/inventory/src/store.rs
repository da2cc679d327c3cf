//! The in-memory inventory collection.
//!
//! The store is the only owner of items. Every mutation validates fully before
//! touching the collection, so a failed call leaves it exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, IdGenerator, TimeOrderedIds};

use crate::event::{InventoryEvent, ItemAdded, ItemRemoved, ItemRestored, ItemUpdated};
use crate::item::{Item, ItemDraft, ItemId};
use crate::validation::{names_match, validate};

/// Upper bound on id draws per `add` before giving up.
const MAX_ID_ATTEMPTS: usize = 32;

/// An item taken out of the store, with the position it held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovedItem {
    item: Item,
    position: usize,
}

impl RemovedItem {
    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn into_item(self) -> Item {
        self.item
    }
}

#[derive(Debug)]
pub struct InventoryStore {
    items: Vec<Item>,
    ids: Box<dyn IdGenerator>,
    events: Vec<InventoryEvent>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    /// Empty store drawing time-ordered ids.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: Box::new(TimeOrderedIds),
            events: Vec::new(),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Load initial items, in order. Seeding records no events.
    ///
    /// Fails with `InvalidSeed` if any item breaks a store invariant.
    pub fn seeded(mut self, items: impl IntoIterator<Item = Item>) -> DomainResult<Self> {
        for item in items {
            if self.get(item.id()).is_some() {
                return Err(DomainError::invalid_seed(format!("duplicate id '{}'", item.id())));
            }
            validate(&ItemDraft::from_item(&item), &self.items, None).map_err(|errors| {
                DomainError::invalid_seed(format!(
                    "item '{}': {}",
                    item.id(),
                    DomainError::validation(errors)
                ))
            })?;
            self.items.push(item);
        }
        tracing::debug!(count = self.items.len(), "inventory seeded");
        Ok(self)
    }

    /// Insertion-ordered view of every item.
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drain the events recorded by successful mutations since the last call.
    pub fn take_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Validate and insert a new item with a freshly generated id.
    pub fn add(&mut self, draft: &ItemDraft, at: DateTime<Utc>) -> DomainResult<Item> {
        self.add_reserving(draft, at, &[])
    }

    /// Like `add`, but the new id also avoids `reserved`, e.g. the id of an
    /// item held for undo.
    pub fn add_reserving(
        &mut self,
        draft: &ItemDraft,
        at: DateTime<Utc>,
        reserved: &[ItemId],
    ) -> DomainResult<Item> {
        let fields = validate(draft, &self.items, None).map_err(|errors| {
            tracing::warn!(errors = errors.len(), "rejected new item");
            DomainError::validation(errors)
        })?;

        let id = self.fresh_id(reserved)?;
        let item = Item::new(id, fields, at);
        self.items.push(item.clone());

        tracing::info!(item_id = %item.id(), name = item.name(), "item added");
        self.events.push(InventoryEvent::ItemAdded(ItemAdded {
            item: item.clone(),
            occurred_at: at,
        }));
        Ok(item)
    }

    /// Validate and replace an existing item in place, keeping its id.
    pub fn update(&mut self, id: &ItemId, draft: &ItemDraft, at: DateTime<Utc>) -> DomainResult<Item> {
        let position = self.position_of(id)?;
        let fields = validate(draft, &self.items, Some(id)).map_err(|errors| {
            tracing::warn!(item_id = %id, errors = errors.len(), "rejected item update");
            DomainError::validation(errors)
        })?;

        let item = self.items[position].replaced(fields, at);
        let previous = std::mem::replace(&mut self.items[position], item.clone());

        tracing::info!(item_id = %id, name = item.name(), "item updated");
        self.events.push(InventoryEvent::ItemUpdated(ItemUpdated {
            previous,
            item: item.clone(),
            occurred_at: at,
        }));
        Ok(item)
    }

    /// Take an item out of the collection.
    pub fn remove(&mut self, id: &ItemId, at: DateTime<Utc>) -> DomainResult<RemovedItem> {
        let position = self.position_of(id)?;
        let item = self.items.remove(position);

        tracing::info!(item_id = %id, name = item.name(), position, "item removed");
        self.events.push(InventoryEvent::ItemRemoved(ItemRemoved {
            item: item.clone(),
            position,
            occurred_at: at,
        }));
        Ok(RemovedItem { item, position })
    }

    /// Put a removed item back, unchanged, where it used to be.
    ///
    /// Refuses rather than overwrites when its id or name has been taken since.
    pub fn restore(&mut self, removed: RemovedItem, at: DateTime<Utc>) -> DomainResult<Item> {
        let RemovedItem { item, position } = removed;

        if self.get(item.id()).is_some() {
            tracing::warn!(item_id = %item.id(), "restore blocked by id conflict");
            return Err(DomainError::id_conflict(item.id().as_str()));
        }
        if let Some(holder) = self.items.iter().find(|other| names_match(other.name(), item.name())) {
            tracing::warn!(item_id = %item.id(), holder = %holder.id(), "restore blocked by name conflict");
            return Err(DomainError::name_conflict(holder.name()));
        }
        validate(&ItemDraft::from_item(&item), &self.items, None).map_err(DomainError::validation)?;

        let position = position.min(self.items.len());
        self.items.insert(position, item.clone());

        tracing::info!(item_id = %item.id(), name = item.name(), position, "item restored");
        self.events.push(InventoryEvent::ItemRestored(ItemRestored {
            item: item.clone(),
            position,
            occurred_at: at,
        }));
        Ok(item)
    }

    fn position_of(&self, id: &ItemId) -> DomainResult<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| DomainError::not_found(id.as_str()))
    }

    fn fresh_id(&mut self, reserved: &[ItemId]) -> DomainResult<ItemId> {
        let mut last = String::new();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = ItemId::new(self.ids.next_id());
            if self.get(&candidate).is_none() && !reserved.contains(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(item_id = %candidate, "generated id collided, drawing again");
            last = candidate.into();
        }
        Err(DomainError::id_conflict(last))
    }
}
