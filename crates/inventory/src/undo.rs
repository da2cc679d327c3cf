//! Single-level, time-bounded undo of the most recent delete.
//!
//! ```text
//! Idle ──record_delete──▶ PendingUndo ──undo──────────▶ Idle (item restored or refused)
//!                           │  ▲   ──expire/expire_due─▶ Idle (snapshot dropped)
//!                           └──┘ record_delete (newer delete supersedes)
//! ```
//!
//! The coordinator never runs timers itself. `record_delete` hands back a
//! `ScheduledExpiry` for the host to schedule; when it fires the host calls
//! `expire(ticket)`. A ticket that was cancelled or superseded is ignored, so a
//! stale timer can never drop a newer snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_core::DomainError;

use crate::item::Item;
use crate::store::{InventoryStore, RemovedItem};

/// Identifies one scheduled expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UndoTicket(u64);

/// When the pending undo closes, and the ticket to present at that time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledExpiry {
    pub ticket: UndoTicket,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UndoState {
    Idle,
    PendingUndo {
        snapshot: RemovedItem,
        expiry: ScheduledExpiry,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UndoError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("undo window for '{name}' has closed")]
    Expired { name: String },

    #[error("cannot restore '{name}': {source}")]
    Conflict {
        name: String,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug)]
pub struct UndoCoordinator {
    window: Duration,
    state: UndoState,
    next_ticket: u64,
}

impl UndoCoordinator {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: UndoState::Idle,
            next_ticket: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &UndoState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, UndoState::Idle)
    }

    /// The deleted item that can still be brought back.
    pub fn pending(&self) -> Option<&Item> {
        match &self.state {
            UndoState::PendingUndo { snapshot, .. } => Some(snapshot.item()),
            UndoState::Idle => None,
        }
    }

    pub fn scheduled(&self) -> Option<ScheduledExpiry> {
        match &self.state {
            UndoState::PendingUndo { expiry, .. } => Some(*expiry),
            UndoState::Idle => None,
        }
    }

    /// Hold `removed` for undo until `now + window`, replacing any older
    /// snapshot. A deadline past the representable range saturates.
    pub fn record_delete(&mut self, removed: RemovedItem, now: DateTime<Utc>) -> ScheduledExpiry {
        if let Some(superseded) = self.pending() {
            tracing::debug!(item_id = %stockroom_core::Entity::id(superseded), "pending undo superseded");
        }

        self.next_ticket += 1;
        let expiry = ScheduledExpiry {
            ticket: UndoTicket(self.next_ticket),
            deadline: now
                .checked_add_signed(self.window)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.state = UndoState::PendingUndo {
            snapshot: removed,
            expiry,
        };
        expiry
    }

    /// Restore the pending item into `store`.
    ///
    /// The coordinator is idle afterwards whatever the outcome.
    pub fn undo(&mut self, store: &mut InventoryStore, now: DateTime<Utc>) -> Result<Item, UndoError> {
        let UndoState::PendingUndo { snapshot, expiry } = std::mem::replace(&mut self.state, UndoState::Idle)
        else {
            return Err(UndoError::NothingToUndo);
        };

        let name = snapshot.item().name().to_string();
        if now >= expiry.deadline {
            tracing::debug!(name = %name, "undo requested after deadline");
            return Err(UndoError::Expired { name });
        }

        store
            .restore(snapshot, now)
            .map_err(|source| UndoError::Conflict { name, source })
    }

    /// Scheduled-callback entry point. Drops the snapshot only if `ticket` is
    /// still the live one; returns the dropped item.
    pub fn expire(&mut self, ticket: UndoTicket) -> Option<Item> {
        let live = matches!(&self.state, UndoState::PendingUndo { expiry, .. } if expiry.ticket == ticket);
        if !live {
            tracing::debug!(ticket = ticket.0, "ignoring stale undo expiry");
            return None;
        }
        self.take_pending()
    }

    /// Poll-style expiry for hosts without timers.
    pub fn expire_due(&mut self, now: DateTime<Utc>) -> Option<Item> {
        let due = matches!(&self.state, UndoState::PendingUndo { expiry, .. } if now >= expiry.deadline);
        if due { self.take_pending() } else { None }
    }

    /// Drop any pending snapshot without restoring it.
    pub fn cancel(&mut self) -> Option<Item> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<Item> {
        match std::mem::replace(&mut self.state, UndoState::Idle) {
            UndoState::PendingUndo { snapshot, .. } => Some(snapshot.into_item()),
            UndoState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemDraft, ItemId};
    use chrono::TimeZone;
    use stockroom_core::{Entity, SequentialIds};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn secs(n: i64) -> Duration {
        Duration::seconds(n)
    }

    fn seeded_store() -> InventoryStore {
        let mut store = InventoryStore::new().with_id_generator(SequentialIds::new(""));
        for (name, category, q, p) in [
            ("Laptop", "Electronics", 15, 1200.0),
            ("Office Chair", "Furniture", 25, 250.0),
            ("Printer", "Electronics", 5, 350.0),
        ] {
            store.add(&ItemDraft::new(name, category, q, p), t0()).unwrap();
        }
        store
    }

    fn delete(store: &mut InventoryStore, undo: &mut UndoCoordinator, id: &str, at: DateTime<Utc>) -> ScheduledExpiry {
        let removed = store.remove(&ItemId::new(id), at).unwrap();
        undo.record_delete(removed, at)
    }

    #[test]
    fn undo_before_deadline_restores_identical_item() {
        let mut store = seeded_store();
        let before = store.list().to_vec();
        let mut undo = UndoCoordinator::new(secs(4));

        let expiry = delete(&mut store, &mut undo, "3", t0());
        assert_eq!(expiry.deadline, t0() + secs(4));
        assert_eq!(undo.pending().map(|i| i.name()), Some("Printer"));

        let restored = undo.undo(&mut store, t0() + secs(3)).unwrap();

        assert_eq!(restored, before[2]);
        assert_eq!(store.list(), before.as_slice());
        assert!(undo.is_idle());
    }

    #[test]
    fn undo_at_or_after_deadline_fails() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(secs(4));
        delete(&mut store, &mut undo, "3", t0());

        let err = undo.undo(&mut store, t0() + secs(4)).unwrap_err();

        assert_eq!(err, UndoError::Expired { name: "Printer".into() });
        assert!(store.get(&ItemId::new("3")).is_none());
        assert!(undo.is_idle());
    }

    #[test]
    fn newer_delete_supersedes_pending_undo() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(secs(4));
        delete(&mut store, &mut undo, "3", t0());
        delete(&mut store, &mut undo, "1", t0() + secs(1));

        let restored = undo.undo(&mut store, t0() + secs(2)).unwrap();
        assert_eq!(restored.name(), "Laptop");
        assert!(store.get(&ItemId::new("3")).is_none());

        assert_eq!(undo.undo(&mut store, t0() + secs(2)), Err(UndoError::NothingToUndo));
    }

    #[test]
    fn stale_ticket_does_not_drop_newer_snapshot() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(secs(4));
        let first = delete(&mut store, &mut undo, "3", t0());
        let second = delete(&mut store, &mut undo, "2", t0() + secs(1));

        assert_eq!(undo.expire(first.ticket), None);
        assert_eq!(undo.pending().map(|i| i.id().as_str()), Some("2"));

        assert_eq!(undo.expire(second.ticket).map(|i| i.name().to_string()), Some("Office Chair".into()));
        assert!(undo.is_idle());
    }

    #[test]
    fn expire_due_only_fires_at_deadline() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(secs(4));
        delete(&mut store, &mut undo, "1", t0());

        assert_eq!(undo.expire_due(t0() + secs(3)), None);
        assert!(undo.expire_due(t0() + secs(4)).is_some());
        assert!(undo.is_idle());
    }

    #[test]
    fn conflicting_restore_reports_and_goes_idle() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(secs(4));
        delete(&mut store, &mut undo, "3", t0());
        store.add(&ItemDraft::new("printer", "Electronics", 1, 99.0), t0()).unwrap();

        let err = undo.undo(&mut store, t0() + secs(1)).unwrap_err();

        assert!(matches!(err, UndoError::Conflict { ref name, .. } if name == "Printer"));
        assert!(undo.is_idle());
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[2].name(), "printer");
    }

    #[test]
    fn oversized_window_saturates_the_deadline() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(Duration::milliseconds(i64::MAX));

        let expiry = delete(&mut store, &mut undo, "3", t0());

        assert_eq!(expiry.deadline, DateTime::<Utc>::MAX_UTC);
        assert_eq!(undo.undo(&mut store, t0() + secs(1)).unwrap().name(), "Printer");
    }

    #[test]
    fn cancel_discards_snapshot() {
        let mut store = seeded_store();
        let mut undo = UndoCoordinator::new(secs(4));
        let expiry = delete(&mut store, &mut undo, "1", t0());

        assert!(undo.cancel().is_some());
        assert_eq!(undo.expire(expiry.ticket), None);
        assert_eq!(undo.undo(&mut store, t0()), Err(UndoError::NothingToUndo));
    }
}
