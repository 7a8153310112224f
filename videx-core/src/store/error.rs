//! Storage-layer errors.

use std::fmt;

use thiserror::Error;

/// Uniqueness rules a backend enforces on account records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueConstraint {
    /// Handles are unique across users and channels alike.
    Handle,
    /// Email addresses are unique across users.
    Email,
}

impl fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueConstraint::Handle => write!(f, "handle"),
            UniqueConstraint::Email => write!(f, "email"),
        }
    }
}

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// A write collided with a uniqueness rule. The write left no partial
    /// record behind.
    #[error("{constraint} {value:?} already registered")]
    Duplicate {
        /// Which rule was violated.
        constraint: UniqueConstraint,
        /// The colliding value, as submitted.
        value: String,
    },

    /// A write violated a structural document constraint (e.g. a channel
    /// arriving with no owners).
    #[error("constraint violated: {0}")]
    Check(String),

    /// The backend itself failed.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Convenience alias for storage results.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
