//! Page fill strategies.
//!
//! When a listing runs out before the requested limit, the fill strategy
//! decides what the short page looks like. The default behaviour repeats
//! the remaining entities cyclically until the page is full, which keeps
//! fixed-size client layouts (carousels, grids) populated without a second
//! request. The strategy is a seam: swapping it changes presentation only,
//! never cursor arithmetic.

/// Strategy for presenting a page that came up short of its limit.
pub trait PageFill<T>: Send + Sync {
    /// Expands (or leaves alone) a short page. `window` holds at most
    /// `limit` entities; the cursor for the page has already been decided
    /// from the unfilled window.
    fn fill(&self, window: Vec<T>, limit: usize) -> Vec<T>;

    /// Name of the strategy, for logs and diagnostics.
    fn name(&self) -> &'static str;
}

/// Repeats a short page cyclically until it reaches the limit.
///
/// An empty window stays empty; there is nothing to repeat.
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleFill;

impl<T: Clone> PageFill<T> for CycleFill {
    fn fill(&self, window: Vec<T>, limit: usize) -> Vec<T> {
        if window.is_empty() || window.len() >= limit {
            return window;
        }
        window.iter().cloned().cycle().take(limit).collect()
    }

    fn name(&self) -> &'static str {
        "cycle"
    }
}

/// Returns short pages as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortFill;

impl<T: Clone> PageFill<T> for ShortFill {
    fn fill(&self, window: Vec<T>, _limit: usize) -> Vec<T> {
        window
    }

    fn name(&self) -> &'static str {
        "short"
    }
}
