use anyhow::Context;

use stockroom_core::Entity;
use stockroom_inventory::{ItemDraft, ItemId, SortField};
use stockroom_session::{FormMode, InventorySession, SessionConfig};

/// Scripted walk through a session: add, edit, delete, undo, then print the
/// table and report as JSON.
fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = SessionConfig::from_env().context("failed to load session configuration")?;
    let mut session = InventorySession::new(&config).context("failed to start inventory session")?;
    let notifications = session.subscribe();

    let lamp = session.submit_item(&ItemDraft::new("Desk Lamp", "Furniture", 3, 45.5), FormMode::Add)?;
    session.submit_item(
        &ItemDraft::from_item(&lamp).with_supplier("Brightline"),
        FormMode::Edit(lamp.id().clone()),
    )?;

    // rejected: the name is taken
    let _ = session.submit_item(&ItemDraft::new("laptop", "Electronics", 1, 1.0), FormMode::Add);

    if session.request_delete(&ItemId::new("3")).is_ok() {
        session.confirm_delete()?;
        if let Err(err) = session.undo() {
            tracing::warn!(error = %err, "demo undo failed");
        }
    }

    session.toggle_sort(SortField::Price);

    for notification in notifications.drain() {
        tracing::info!(kind = ?notification.kind, undo = notification.undo_available, "{}", notification.message);
    }

    let output = serde_json::json!({
        "rows": session.filtered_sorted_items(),
        "report": session.report(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
