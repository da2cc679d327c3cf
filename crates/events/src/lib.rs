//! Events emitted by domain operations and the bus that fans them out to
//! subscribers (usually the rendering layer).

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
