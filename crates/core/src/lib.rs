//! `stockroom-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no UI, no IO).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{ConflictTarget, DomainError, DomainResult, FieldError};
pub use id::{IdGenerator, SequentialIds, TimeOrderedIds};
