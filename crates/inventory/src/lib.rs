//! Inventory domain module.
//!
//! Item validation, the in-memory store, derived views and delete/undo
//! coordination, implemented as deterministic domain logic (no IO, no UI).
//! Callers pass the current time in explicitly.

pub mod event;
pub mod item;
pub mod store;
pub mod undo;
pub mod validation;
pub mod view;

pub use event::{InventoryEvent, ItemAdded, ItemRemoved, ItemRestored, ItemUpdated};
pub use item::{Category, FormValue, Item, ItemDraft, ItemField, ItemId, ValidatedItem};
pub use store::{InventoryStore, RemovedItem};
pub use undo::{ScheduledExpiry, UndoCoordinator, UndoError, UndoState, UndoTicket};
pub use validation::{NAME_MAX_LEN, NAME_MIN_LEN, names_match, validate};
pub use view::{
    CategorySummary, LOW_STOCK_THRESHOLD, Report, SortDirection, SortField, SortState, aggregate,
    filter_by_name, sort_by,
};
