//! `stockroom-session`
//!
//! **Responsibility:** the boundary between the inventory domain and whatever
//! renders it.
//!
//! This crate provides:
//! - input events (submit, delete request/confirm/cancel, undo, search, sort)
//! - render outputs (items, table rows, report)
//! - a notification stream with one message per action
//! - configuration and the session clock

pub mod clock;
pub mod config;
pub mod notification;
pub mod seed;
pub mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use notification::{Notification, NotificationKind};
pub use session::{FormMode, InventorySession};
