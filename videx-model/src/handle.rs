use crate::error::ModelError;
use std::fmt;

/// Account handle value object with validation
///
/// Represents a validated account handle that follows the platform rules:
/// - 3-30 characters in length
/// - ASCII letters, numbers, underscores, hyphens, and periods
/// - Must start with a letter or number
/// - Case is preserved; uniqueness is case-insensitive
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(String);

const RESERVED_HANDLES: &[&str] = &["admin", "api", "system", "support", "videx"];

impl Handle {
    /// Create a new handle with validation
    pub fn new(handle: impl AsRef<str>) -> Result<Self, ModelError> {
        let handle = handle.as_ref();

        if handle.len() < 3 {
            return Err(ModelError::InvalidHandle(
                "handle must be at least 3 characters".to_string(),
            ));
        }

        if handle.len() > 30 {
            return Err(ModelError::InvalidHandle(
                "handle cannot exceed 30 characters".to_string(),
            ));
        }

        if !handle
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
        {
            return Err(ModelError::InvalidHandle(
                "handle must start with a letter or number".to_string(),
            ));
        }

        if !handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            return Err(ModelError::InvalidHandle(
                "handle can only contain letters, numbers, underscores, hyphens, and periods"
                    .to_string(),
            ));
        }

        if RESERVED_HANDLES.contains(&handle.to_ascii_lowercase().as_str()) {
            return Err(ModelError::InvalidHandle("this handle is reserved".to_string()));
        }

        Ok(Self(handle.to_string()))
    }

    /// Get the handle as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the handle as a String
    pub fn into_string(self) -> String {
        self.0
    }

    /// Lowercased form used for case-insensitive uniqueness checks
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
