//! Page window arithmetic for infinite-scroll listings.

use serde::{Deserialize, Serialize};

/// Products per page in category listings.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination info for a 1-indexed page over `total` items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of filtered items.
    pub total: usize,
}

impl Pagination {
    /// Create pagination info. `page` and `per_page` are clamped to at least 1.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            total,
        }
    }

    /// First pagination state for a result set.
    pub fn first(per_page: usize, total: usize) -> Self {
        Self::new(1, per_page, total)
    }

    /// Index range covered by the current page alone, clamped to `total`.
    pub fn page_range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.per_page).min(self.total);
        let end = (self.page * self.per_page).min(self.total);
        start..end
    }

    /// Index range covered by pages `1..=page` together.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        0..(self.page * self.per_page).min(self.total)
    }

    /// Whether another page exists after this one.
    pub fn has_more(&self) -> bool {
        self.page * self.per_page < self.total
    }

    /// The following page, or `None` when exhausted.
    pub fn next(&self) -> Option<Self> {
        self.has_more()
            .then(|| Self::new(self.page + 1, self.per_page, self.total))
    }

    /// Total number of pages (at least 1).
    pub fn total_pages(&self) -> usize {
        if self.total == 0 {
            1
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}
