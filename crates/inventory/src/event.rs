use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_events::Event;

use crate::item::Item;

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: Item,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub previous: Item,
    pub item: Item,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub item: Item,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRestored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRestored {
    pub item: Item,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ItemAdded(ItemAdded),
    ItemUpdated(ItemUpdated),
    ItemRemoved(ItemRemoved),
    ItemRestored(ItemRestored),
}

impl InventoryEvent {
    /// The item as it stands after the event.
    pub fn item(&self) -> &Item {
        match self {
            InventoryEvent::ItemAdded(e) => &e.item,
            InventoryEvent::ItemUpdated(e) => &e.item,
            InventoryEvent::ItemRemoved(e) => &e.item,
            InventoryEvent::ItemRestored(e) => &e.item,
        }
    }
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ItemAdded(_) => "inventory.item.added",
            InventoryEvent::ItemUpdated(_) => "inventory.item.updated",
            InventoryEvent::ItemRemoved(_) => "inventory.item.removed",
            InventoryEvent::ItemRestored(_) => "inventory.item.restored",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ItemAdded(e) => e.occurred_at,
            InventoryEvent::ItemUpdated(e) => e.occurred_at,
            InventoryEvent::ItemRemoved(e) => e.occurred_at,
            InventoryEvent::ItemRestored(e) => e.occurred_at,
        }
    }
}
