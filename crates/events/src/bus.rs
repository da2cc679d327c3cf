//! Publish/subscribe abstraction (mechanics only).
//!
//! Every subscriber receives its own copy of every message published after it
//! subscribed, in publication order. Messages are not retained: a subscriber
//! that joins late does not see earlier messages.

use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a message stream.
///
/// ```ignore
/// let subscription = bus.subscribe();
/// session.undo();
/// for notification in subscription.drain() {
///     render(notification);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic message bus.
///
/// `publish()` can fail (e.g. poisoned internal state); callers decide whether a
/// failed publication matters. Domain state is never rolled back because a
/// subscriber could not be reached.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}
