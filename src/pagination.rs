//! Pagination window calculation
//!
//! A [`PageWindow`] is the set of navigable page numbers (first, previous,
//! next, last) derived from a total item count and the current position.
//! It feeds the `X-Page-*` response headers set by [`crate::headers`].
//!
//! # Example
//!
//! ```rust
//! use restgate::pagination::PageWindow;
//!
//! let window = PageWindow::compute(40, 2, 10);
//! assert_eq!(window.first, 1);
//! assert_eq!(window.prev, 1);
//! assert_eq!(window.next, 3);
//! assert_eq!(window.last, 4);
//! ```

/// Navigable page numbers for a paginated collection
///
/// All values are 1-based. Invariants upheld by [`PageWindow::compute`]:
/// `first == 1`, `prev >= first`, `next <= last`, and the window collapses
/// to a single page when the collection is empty or the page size is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// First page, always 1
    pub first: u32,
    /// Previous page, floored at `first`
    pub prev: u32,
    /// Next page, capped at `last`
    pub next: u32,
    /// Last page, `ceil(total / per_page)` floored at 1
    pub last: u32,
}

impl PageWindow {
    /// Compute the window for `total` items viewed from `page` with
    /// `per_page` items per page.
    ///
    /// Pure and stable: identical inputs always yield identical outputs.
    #[must_use]
    pub fn compute(total: u64, page: u32, per_page: u32) -> Self {
        if total == 0 || per_page == 0 {
            return Self::single();
        }

        let last = calculate_last_page(total, per_page);
        let first = 1;
        let prev = page.saturating_sub(1).max(first);
        let next = page.saturating_add(1).min(last);

        Self {
            first,
            prev,
            next,
            last,
        }
    }

    /// Degenerate single-page window
    #[must_use]
    pub fn single() -> Self {
        Self {
            first: 1,
            prev: 1,
            next: 1,
            last: 1,
        }
    }
}

/// Calculate the last page number, rounding up
fn calculate_last_page(total: u64, per_page: u32) -> u32 {
    let per_page = u64::from(per_page);
    // Ceiling division: (total + per_page - 1) / per_page
    let pages = total.saturating_add(per_page).saturating_sub(1) / per_page;
    pages.clamp(1, u64::from(u32::MAX)) as u32
}
