//! Operation surface over the content graph.
//!
//! Each service owns one slice of the surface and talks to storage through
//! the [`crate::store`] ports. Cross-document writes follow a single
//! convention: validate against fetched clones, write the authoritative
//! document first, then converge the dependent documents, compensating the
//! first write when a follow-up fails.

pub mod browse;
pub mod channels;
pub mod content;
pub mod listings;
pub mod users;

pub use browse::BrowseService;
pub use channels::ChannelService;
pub use content::ContentService;
pub use listings::ListingService;
pub use users::UserService;

use crate::error::{Error, Result};
use crate::rbac::Action;

/// Maximum length accepted for display names, in characters.
const DISPLAY_NAME_MAX: usize = 100;

pub(crate) fn validate_display_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidBody("display name cannot be empty".to_string()));
    }
    if name.chars().count() > DISPLAY_NAME_MAX {
        return Err(Error::InvalidBody(format!(
            "display name cannot exceed {DISPLAY_NAME_MAX} characters"
        )));
    }
    Ok(())
}

pub(crate) fn forbidden(action: Action) -> Error {
    Error::Forbidden(action.as_str().to_string())
}
