//! A single page of listing results.

use serde::{Deserialize, Serialize};

use crate::listing::cursor::Cursor;

/// One page of a cursor listing.
///
/// `cursor` resumes the listing after the last entity of a filled page and
/// is [`Cursor::Beginning`] when the listing is exhausted, regardless of any
/// padding applied to `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The entities on this page, in listing order.
    pub content: Vec<T>,
    /// Where the next request should resume.
    pub cursor: Cursor,
    /// The limit this page was served with.
    pub limit: usize,
}

impl<T> Page<T> {
    /// An exhausted page with no content.
    pub fn empty(limit: usize) -> Self {
        Page {
            content: Vec::new(),
            cursor: Cursor::Beginning,
            limit,
        }
    }

    /// Whether this page carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maps page content into another shape, keeping cursor and limit.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            cursor: self.cursor,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_cursor_and_limit() {
        let page = Page {
            content: vec![1, 2, 3],
            cursor: Cursor::Beginning,
            limit: 24,
        };
        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.content, vec![10, 20, 30]);
        assert_eq!(mapped.cursor, Cursor::Beginning);
        assert_eq!(mapped.limit, 24);
    }

    #[test]
    fn empty_page_is_exhausted() {
        let page: Page<u32> = Page::empty(5);
        assert!(page.is_empty());
        assert!(page.cursor.is_beginning());
    }
}
