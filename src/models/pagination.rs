//! Paging for the back-office tables (orders, tickets, customers).

use serde::{Deserialize, Serialize};

/// `?page=&per_page=` as sent by the client. Anything may be missing or out
/// of range; resolve it with [`Pagination::window`] before querying.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// A resolved page: 1-based `page`, row `limit`, and row `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: i64 = 25;
    pub const MAX_PER_PAGE: i64 = 100;
    /// Deepest page served. Keeps `offset` far from overflow.
    pub const MAX_PAGE: i64 = 100_000;

    pub fn window(&self) -> PageWindow {
        let limit = self
            .per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE);
        let page = self.page.unwrap_or(1).clamp(1, Self::MAX_PAGE);
        PageWindow {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }
}

/// One page of rows and the counters a table footer needs.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, window: PageWindow) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total - 1) / window.limit + 1
        };
        Self {
            items,
            total,
            page: window.page,
            per_page: window.limit,
            total_pages,
            has_next: window.page < total_pages,
        }
    }
}
