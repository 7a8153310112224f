//! Cursor listings: opaque cursors, page shapes, and fill strategies.

pub mod cursor;
pub mod engine;
pub mod fill;
pub mod page;

pub use cursor::Cursor;
pub use engine::{paginate, paginate_with};
pub use fill::{CycleFill, PageFill, ShortFill};
pub use page::Page;
