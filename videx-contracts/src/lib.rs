//! Trait surfaces that describe interactions with Videx data models.

pub mod content_like;
pub mod id;
pub mod listing;

/// Frequently used trait combinators for orchestration crates.
pub mod prelude {
    pub use super::content_like::{
        Collection, ContentOps, HasCredits, Watchable,
    };
    pub use super::id::{AccountIdLike, ContentIdLike};
    pub use super::listing::Listable;
}
