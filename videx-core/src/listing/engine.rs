//! Deterministic cursor pagination.
//!
//! Entities are ordered by their [`ListingOrder`] (time-ordered UUIDs, so
//! insertion order), the cursor selects everything strictly after the last
//! seen order, and the page is cut at the limit. The next cursor is decided
//! from the unfilled window: a filled page resumes after its last entity,
//! an underfilled page is the end of the listing and resumes from
//! [`Cursor::Beginning`].

use tracing::trace;
use videx_contracts::listing::Listable;
use videx_model::ListingOrder;

use crate::listing::cursor::Cursor;
use crate::listing::fill::PageFill;
use crate::listing::page::Page;

/// Paginates `items` by an explicit ordering key.
///
/// The same inputs always produce the same page: items are sorted by key
/// before the cursor window is applied, so store iteration order never
/// leaks into the output.
pub fn paginate_with<T: Clone>(
    mut items: Vec<T>,
    order_of: impl Fn(&T) -> ListingOrder,
    cursor: &Cursor,
    limit: usize,
    fill: &dyn PageFill<T>,
) -> Page<T> {
    items.sort_by_key(&order_of);

    let after = cursor.order();
    let window: Vec<T> = items
        .into_iter()
        .filter(|item| order_of(item) > after)
        .take(limit)
        .collect();

    let next = match window.last() {
        Some(last) if window.len() == limit => Cursor::after(order_of(last)),
        _ => Cursor::Beginning,
    };

    trace!(
        window = window.len(),
        limit,
        exhausted = next.is_beginning(),
        strategy = fill.name(),
        "cut listing page"
    );

    Page {
        content: fill.fill(window, limit),
        cursor: next,
        limit,
    }
}

/// Paginates listable entities by their natural listing order.
pub fn paginate<T: Listable + Clone>(
    items: Vec<T>,
    cursor: &Cursor,
    limit: usize,
    fill: &dyn PageFill<T>,
) -> Page<T> {
    paginate_with(items, Listable::order, cursor, limit, fill)
}
