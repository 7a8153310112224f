use crate::error::ModelError;
use std::fmt;

/// Email address value object with validation
///
/// Light syntactic validation only; deliverability is the mail system's
/// problem. Case is preserved, uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address with validation
    pub fn new(email: impl AsRef<str>) -> Result<Self, ModelError> {
        let email = email.as_ref().trim();

        if email.is_empty() {
            return Err(ModelError::InvalidEmail(
                "email cannot be empty".to_string(),
            ));
        }

        if email.len() > 254 {
            return Err(ModelError::InvalidEmail(
                "email cannot exceed 254 characters".to_string(),
            ));
        }

        if email.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidEmail(
                "email cannot contain whitespace".to_string(),
            ));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(ModelError::InvalidEmail(
                "email must contain an @".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ModelError::InvalidEmail(
                "email must have a local part and a domain".to_string(),
            ));
        }

        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ModelError::InvalidEmail(
                "email domain is malformed".to_string(),
            ));
        }

        Ok(Self(email.to_string()))
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the email as a String
    pub fn into_string(self) -> String {
        self.0
    }

    /// Lowercased form used for case-insensitive uniqueness checks
    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        assert!(EmailAddress::new("alice@example.com").is_ok());
        assert!(EmailAddress::new("alice.smith+tag@mail.example.org").is_ok());
        assert!(EmailAddress::new("  alice@example.com  ").is_ok());
    }

    #[test]
    fn invalid_emails() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("alice").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("alice@").is_err());
        assert!(EmailAddress::new("alice@localhost").is_err());
        assert!(EmailAddress::new("alice@.com").is_err());
        assert!(EmailAddress::new("alice smith@example.com").is_err());
        assert!(EmailAddress::new("alice@ex@ample.com").is_err());
    }

    #[test]
    fn normalized_lowercases() {
        let email = EmailAddress::new("Alice@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Alice@Example.COM");
        assert_eq!(email.normalized(), "alice@example.com");
    }
}
