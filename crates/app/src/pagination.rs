//! Offset pagination shared by catalog and order listings.

use serde::Serialize;

/// Hard ceiling on page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build a page request, falling back to page 1 and `default_limit`.
    ///
    /// Zero values are treated as absent and limits are clamped to
    /// [`MAX_PAGE_LIMIT`].
    #[must_use]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.filter(|page| *page > 0).unwrap_or(1);

        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(default_limit)
            .clamp(1, MAX_PAGE_LIMIT);

        Self { page, limit }
    }

    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page starts.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    #[must_use]
    pub fn new(request: PageRequest, total_items: u64) -> Self {
        let limit = u64::from(request.limit());
        let shown = u64::from(request.page()) * limit;

        Self {
            current_page: request.page(),
            total_pages: total_items.div_ceil(limit),
            total_items,
            has_next_page: shown < total_items,
            has_prev_page: request.page() > 1,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(request, total_items),
        }
    }
}
