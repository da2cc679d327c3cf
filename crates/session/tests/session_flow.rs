//! Black-box session flows, driven only through input events.

use chrono::{DateTime, Duration, TimeZone, Utc};

use stockroom_core::Entity;
use stockroom_inventory::{ItemDraft, ItemId, UndoError};
use stockroom_session::{
    FormMode, InventorySession, ManualClock, Notification, NotificationKind, SessionConfig,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

fn start() -> (InventorySession<ManualClock>, ManualClock) {
    let clock = ManualClock::new(t0());
    let session = InventorySession::with_clock(&SessionConfig::default(), clock.clone()).unwrap();
    (session, clock)
}

fn delete(session: &mut InventorySession<ManualClock>, id: &str) {
    session.request_delete(&ItemId::new(id)).unwrap();
    session.confirm_delete().unwrap();
}

#[test]
fn undo_inside_window_brings_printer_back_unchanged() {
    let (mut session, clock) = start();
    let before = session.items().to_vec();
    let sub = session.subscribe();

    delete(&mut session, "3");
    clock.advance(Duration::seconds(2));
    let restored = session.undo().unwrap();

    assert_eq!(restored, before[2]);
    assert_eq!(session.items(), before.as_slice());

    let kinds: Vec<_> = sub.drain().into_iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Deleted, NotificationKind::Restored]);
}

#[test]
fn undo_after_window_leaves_printer_absent() {
    let (mut session, clock) = start();
    let sub = session.subscribe();

    delete(&mut session, "3");
    clock.advance(Duration::seconds(5));

    assert_eq!(session.undo(), Err(UndoError::Expired { name: "Printer".into() }));
    assert!(session.items().iter().all(|i| i.name() != "Printer"));

    let last: Notification = sub.drain().pop().unwrap();
    assert_eq!(last.kind, NotificationKind::UndoUnavailable);
    assert!(!last.undo_available);
}

#[test]
fn second_delete_takes_over_the_undo() {
    let (mut session, _) = start();

    delete(&mut session, "3");
    delete(&mut session, "1");

    assert_eq!(session.undo().unwrap().name(), "Laptop");
    assert!(session.items().iter().all(|i| i.name() != "Printer"));
    assert_eq!(session.undo(), Err(UndoError::NothingToUndo));
}

#[test]
fn undo_is_refused_once_the_name_is_reused() {
    let (mut session, _) = start();
    let sub = session.subscribe();

    delete(&mut session, "3");
    let replacement = session
        .submit_item(&ItemDraft::new("PRINTER", "Electronics", 2, 180.0), FormMode::Add)
        .unwrap();

    assert!(matches!(session.undo(), Err(UndoError::Conflict { .. })));
    assert_eq!(session.items().len(), 3);
    assert!(session.items().iter().any(|i| i.id() == replacement.id()));

    let last = sub.drain().pop().unwrap();
    assert_eq!(last.kind, NotificationKind::UndoUnavailable);
}

#[test]
fn notifications_serialize_for_the_renderer() {
    let (mut session, _) = start();
    let sub = session.subscribe();

    delete(&mut session, "2");

    let json = serde_json::to_value(sub.drain().remove(0)).unwrap();
    assert_eq!(json["kind"], "Deleted");
    assert_eq!(json["title"], "Item Deleted");
    assert_eq!(json["message"], "Office Chair has been removed from inventory.");
    assert_eq!(json["undoAvailable"], true);
    assert!(json.get("fieldErrors").is_none());
}
