//! User-facing notifications. The session decides content and timing; the
//! rendering layer decides how they look.

use serde::{Deserialize, Serialize};

use stockroom_core::{ConflictTarget, DomainError, FieldError};
use stockroom_inventory::{InventoryEvent, Item, ItemId, ScheduledExpiry, UndoError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    Added,
    Updated,
    Deleted,
    Restored,
    ValidationFailed,
    /// The targeted item was already gone; nothing changed.
    NotFound,
    /// An undo was requested but could not be carried out.
    UndoUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub undo_available: bool,
    /// Set on `Deleted`: when the undo button should disappear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry: Option<ScheduledExpiry>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub field_errors: Vec<FieldError>,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, message: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message,
            undo_available: false,
            expiry: None,
            field_errors: Vec::new(),
        }
    }

    pub fn added(item: &Item) -> Self {
        Self::new(
            NotificationKind::Added,
            "Item Added",
            format!("{} has been added to inventory.", item.name()),
        )
    }

    pub fn updated(item: &Item) -> Self {
        Self::new(
            NotificationKind::Updated,
            "Item Updated",
            format!("{} has been updated.", item.name()),
        )
    }

    pub fn deleted(item: &Item, expiry: Option<ScheduledExpiry>) -> Self {
        Self {
            undo_available: expiry.is_some(),
            expiry,
            ..Self::new(
                NotificationKind::Deleted,
                "Item Deleted",
                format!("{} has been removed from inventory.", item.name()),
            )
        }
    }

    pub fn restored(item: &Item) -> Self {
        Self::new(
            NotificationKind::Restored,
            "Item Restored",
            format!("{} has been restored to inventory.", item.name()),
        )
    }

    pub fn validation_failed(errors: &[FieldError]) -> Self {
        Self {
            field_errors: errors.to_vec(),
            ..Self::new(
                NotificationKind::ValidationFailed,
                "Invalid Item",
                "Please correct the highlighted fields.".to_string(),
            )
        }
    }

    pub fn not_found(id: &ItemId) -> Self {
        Self::new(
            NotificationKind::NotFound,
            "Item Not Found",
            format!("Item {id} no longer exists."),
        )
    }

    pub fn undo_unavailable(err: &UndoError) -> Self {
        let message = match err {
            UndoError::NothingToUndo => "There is nothing to undo.".to_string(),
            UndoError::Expired { name } => format!("{name} can no longer be restored."),
            UndoError::Conflict {
                name,
                source: DomainError::Conflict(ConflictTarget::Id(_)),
            } => format!("{name} cannot be restored because another item now uses its id."),
            UndoError::Conflict { name, .. } => {
                format!("{name} cannot be restored because another item now uses its name.")
            }
        };
        Self::new(NotificationKind::UndoUnavailable, "Undo Unavailable", message)
    }

    /// The notification announcing a store event. Removals offer undo when an
    /// expiry was scheduled for them.
    pub fn for_event(event: &InventoryEvent, undo: Option<ScheduledExpiry>) -> Self {
        match event {
            InventoryEvent::ItemAdded(e) => Self::added(&e.item),
            InventoryEvent::ItemUpdated(e) => Self::updated(&e.item),
            InventoryEvent::ItemRemoved(e) => Self::deleted(&e.item, undo),
            InventoryEvent::ItemRestored(e) => Self::restored(&e.item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_what_was_taken() {
        let by_id = UndoError::Conflict {
            name: "Printer".into(),
            source: DomainError::id_conflict("3"),
        };
        let by_name = UndoError::Conflict {
            name: "Printer".into(),
            source: DomainError::name_conflict("PRINTER"),
        };

        assert_eq!(
            Notification::undo_unavailable(&by_id).message,
            "Printer cannot be restored because another item now uses its id."
        );
        assert_eq!(
            Notification::undo_unavailable(&by_name).message,
            "Printer cannot be restored because another item now uses its name."
        );
    }

    #[test]
    fn undo_unavailable_offers_no_undo() {
        let err = Notification::undo_unavailable(&UndoError::NothingToUndo);
        assert_eq!(err.kind, NotificationKind::UndoUnavailable);
        assert!(!err.undo_available);
        assert!(err.expiry.is_none());
    }
}
