//! Offset pagination for the invoice listing.

use serde::{Deserialize, Serialize};

/// Rows per listing page, shared by the page query and the page count.
pub const ITEMS_PER_PAGE: u64 = 6;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed). Zero is treated as the first page.
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Creates a request for the given 1-indexed page.
    #[must_use]
    pub const fn new(page: u64) -> Self {
        Self { page }
    }

    /// Returns the page number, clamped to at least 1.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.page.max(1)
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.current() - 1).saturating_mul(ITEMS_PER_PAGE)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        ITEMS_PER_PAGE
    }
}

/// Number of pages needed for `total` matching rows. Zero rows means zero pages.
#[must_use]
pub const fn total_pages(total: u64) -> u64 {
    total.div_ceil(ITEMS_PER_PAGE)
}

/// One entry in the page-number strip under a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageLink {
    /// A clickable page number.
    Page(u64),
    /// A gap between page numbers.
    Ellipsis,
}

/// Builds the page-number strip for `current_page` out of `total_pages`.
///
/// Up to seven pages are listed in full. Beyond that the first and last
/// pages stay visible and the neighbourhood of the current page is shown.
#[must_use]
pub fn generate_pagination(current_page: u64, total_pages: u64) -> Vec<PageLink> {
    use PageLink::{Ellipsis, Page};

    if total_pages <= 7 {
        return (1..=total_pages).map(Page).collect();
    }

    if current_page <= 3 {
        return vec![
            Page(1),
            Page(2),
            Page(3),
            Ellipsis,
            Page(total_pages - 1),
            Page(total_pages),
        ];
    }

    if current_page >= total_pages - 2 {
        return vec![
            Page(1),
            Page(2),
            Ellipsis,
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ];
    }

    vec![
        Page(1),
        Ellipsis,
        Page(current_page - 1),
        Page(current_page),
        Page(current_page + 1),
        Ellipsis,
        Page(total_pages),
    ]
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
