//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// What a conflicting write collided with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ConflictTarget {
    Id(String),
    Name(String),
}

impl core::fmt::Display for ConflictTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConflictTarget::Id(id) => write!(f, "id '{id}' is already in use"),
            ConflictTarget::Name(name) => write!(f, "name '{name}' is already in use"),
        }
    }
}

/// Domain-level error.
///
/// Every variant is recoverable: the failed operation leaves state untouched and
/// the caller decides how to present it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more fields failed validation. All violations are collected.
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// The targeted record does not exist (anymore).
    #[error("not found: {id}")]
    NotFound { id: String },

    /// A write would break a uniqueness invariant.
    #[error("conflict: {0}")]
    Conflict(ConflictTarget),

    /// Initial data handed to a store violates its invariants.
    #[error("invalid seed data: {0}")]
    InvalidSeed(String),
}

impl DomainError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn id_conflict(id: impl Into<String>) -> Self {
        Self::Conflict(ConflictTarget::Id(id.into()))
    }

    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::Conflict(ConflictTarget::Name(name.into()))
    }

    pub fn invalid_seed(msg: impl Into<String>) -> Self {
        Self::InvalidSeed(msg.into())
    }

    /// Field errors carried by a `Validation` failure (empty otherwise).
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            DomainError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_field() {
        let err = DomainError::validation(vec![
            FieldError::new("name", "Name must be at least 2 characters"),
            FieldError::new("price", "Price must be greater than 0"),
        ]);

        assert_eq!(
            err.to_string(),
            "validation failed: name: Name must be at least 2 characters; price: Price must be greater than 0"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn non_validation_errors_carry_no_field_errors() {
        assert!(DomainError::not_found("42").field_errors().is_empty());
        assert_eq!(DomainError::not_found("42").to_string(), "not found: 42");
    }

    #[test]
    fn conflict_target_serializes_tagged() {
        let json = serde_json::to_value(ConflictTarget::Name("Printer".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "name", "value": "Printer" }));
    }
}
