//! Storage ports and the in-memory reference backend.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult, UniqueConstraint};
pub use memory::MemoryStore;
pub use traits::{AccountStore, ContentFilter, ContentStore};
