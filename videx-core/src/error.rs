//! Error taxonomy shared by every Videx service.
//!
//! Each variant maps onto a stable machine-readable code and an HTTP-style
//! status number so transport layers can render responses without matching
//! on the enum themselves. Internal faults are redacted before they reach a
//! wire body; the detail stays in the logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use videx_model::ModelError;

use crate::store::StoreError;
use crate::store::UniqueConstraint;

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for graph operations, listings, and account management.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested entity does not exist (or a required reference is gone).
    #[error("not found: {0}")]
    NotFound(String),

    /// A path or body identifier is neither a valid UUID nor a valid handle.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// The supplied listing cursor could not be decoded.
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    /// A request body failed validation.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A polymorphic payload matched more than one variant.
    #[error("ambiguous variant: {0}")]
    AmbiguousVariant(String),

    /// The requested handle is already registered to another account.
    #[error("handle already in use: {0}")]
    HandleInUse(String),

    /// The requested email address is already registered.
    #[error("email already in use")]
    EmailInUse,

    /// The operation would leave a channel without any owner.
    #[error("channel must retain at least one owner")]
    LastOwner,

    /// Promotion was requested for content that cannot be promoted.
    #[error("not promotable: {0}")]
    NotPromotable(String),

    /// No acting user was supplied for an operation that requires one.
    #[error("unauthorized")]
    Unauthorized,

    /// The acting user lacks the role required for this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// An unexpected fault in the storage layer or an invariant breach.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP-style status number for this error.
    pub fn status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::InvalidIdentifier(_)
            | Error::InvalidCursor(_)
            | Error::InvalidBody(_)
            | Error::AmbiguousVariant(_)
            | Error::HandleInUse(_)
            | Error::EmailInUse
            | Error::LastOwner
            | Error::NotPromotable(_) => 400,
            Error::Unauthorized => 401,
            Error::Forbidden(_) => 403,
            Error::Internal(_) => 500,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            Error::InvalidCursor(_) => "INVALID_CURSOR",
            Error::InvalidBody(_) => "INVALID_BODY",
            Error::AmbiguousVariant(_) => "AMBIGUOUS_VARIANT",
            Error::HandleInUse(_) => "HANDLE_IN_USE",
            Error::EmailInUse => "EMAIL_IN_USE",
            Error::LastOwner => "LAST_OWNER",
            Error::NotPromotable(_) => "NOT_PROMOTABLE",
            Error::Unauthorized => "UNAUTHORIZED",
            Error::Forbidden(_) => "FORBIDDEN",
            Error::Internal(_) => "INTERNAL",
        }
    }

    /// Wire body for this error. Internal faults are redacted.
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            Error::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        ErrorBody {
            status: self.status(),
            code: self.code().to_string(),
            message,
        }
    }
}

/// Serializable error shape returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP-style status number.
    pub status: u16,
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable description, redacted for internal faults.
    pub message: String,
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::InvalidIdentifier(_) => Error::InvalidIdentifier(err.to_string()),
            ModelError::AmbiguousVariant(_) => Error::AmbiguousVariant(err.to_string()),
            ModelError::LastOwner => Error::LastOwner,
            ModelError::InvalidHandle(_)
            | ModelError::InvalidEmail(_)
            | ModelError::InvalidContent(_) => Error::InvalidBody(err.to_string()),
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate {
                constraint: UniqueConstraint::Handle,
                value,
            } => Error::HandleInUse(value),
            StoreError::Duplicate {
                constraint: UniqueConstraint::Email,
                ..
            } => Error::EmailInUse,
            StoreError::NotFound(what) => Error::NotFound(what),
            StoreError::Check(_) | StoreError::Backend(_) => Error::Internal(err.to_string()),
        }
    }
}
