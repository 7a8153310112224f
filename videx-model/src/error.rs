use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidIdentifier(String),
    InvalidHandle(String),
    InvalidEmail(String),
    InvalidContent(String),
    AmbiguousVariant(String),
    LastOwner,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidIdentifier(msg) => {
                write!(f, "invalid identifier: {msg}")
            }
            ModelError::InvalidHandle(msg) => {
                write!(f, "invalid handle: {msg}")
            }
            ModelError::InvalidEmail(msg) => {
                write!(f, "invalid email: {msg}")
            }
            ModelError::InvalidContent(msg) => {
                write!(f, "invalid content: {msg}")
            }
            ModelError::AmbiguousVariant(msg) => {
                write!(f, "ambiguous variant: {msg}")
            }
            ModelError::LastOwner => {
                write!(f, "channel must retain at least one owner")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
