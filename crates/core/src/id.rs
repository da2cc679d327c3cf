//! Identifier generation and string-backed identifier newtypes.

use uuid::Uuid;

/// Source of fresh opaque identifiers.
///
/// Generators are not required to guarantee global uniqueness on their own;
/// stores check every drawn id against the ids they already hold and draw again
/// on collision.
pub trait IdGenerator: core::fmt::Debug {
    fn next_id(&mut self) -> String;
}

/// Time-ordered identifiers (UUIDv7: millisecond timestamp + random bits).
///
/// Successive ids drawn within the same millisecond still differ in their
/// random suffix.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeOrderedIds;

impl IdGenerator for TimeOrderedIds {
    fn next_id(&mut self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Deterministic `<prefix><n>` identifiers, for tests and fixtures.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: first,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Implements the usual conversions for a `pub struct X(String)` identifier.
#[macro_export]
macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ordered_ids_differ_on_rapid_calls() {
        let mut ids = TimeOrderedIds;
        let drawn: std::collections::HashSet<String> = (0..1_000).map(|_| ids.next_id()).collect();
        assert_eq!(drawn.len(), 1_000);
    }

    #[test]
    fn sequential_ids_count_up_from_start() {
        let mut ids = SequentialIds::starting_at("item-", 7);
        assert_eq!(ids.next_id(), "item-7");
        assert_eq!(ids.next_id(), "item-8");
    }
}
