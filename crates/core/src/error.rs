//! Domain error model.

use thiserror::Error;

use crate::id::ItemId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, stock checks). Storage failures belong to the infra layer.
/// Every variant is recoverable: the operation that produced it left state
/// untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. zero quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier was invalid (e.g. parse failure, zero).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No catalog item carries this id.
    #[error("item {0} not found")]
    NotFound(ItemId),

    /// The item exists but has no stock left.
    #[error("item {0} is out of stock")]
    OutOfStock(ItemId),

    /// More units were requested than the item has in stock.
    #[error("insufficient stock for item {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ItemId,
        requested: u32,
        available: u32,
    },

    /// A cart line reference fell outside `[0, len)`.
    #[error("cart line {index} does not exist (cart has {len} lines)")]
    InvalidLineIndex { index: usize, len: usize },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(id: ItemId) -> Self {
        Self::NotFound(id)
    }
}
