//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Request parameters for paginated queries.
///
/// Construction never fails: a page below 1 becomes 1 and a zero limit
/// becomes [`DEFAULT_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub limit: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 { DEFAULT_PAGE_SIZE } else { limit },
        }
    }

    /// Create a page request from loosely-typed input, falling back to the
    /// defaults for anything missing or non-positive.
    pub fn from_raw(page: Option<i64>, limit: Option<i64>, default_limit: u64) -> Self {
        let page = page.filter(|p| *p > 0).map_or(1, |p| p as u64);
        let limit = limit
            .filter(|l| *l > 0)
            .map_or(default_limit, |l| l as u64);
        Self::new(page, limit)
    }

    /// Cap the limit at `max` (a `max` of zero leaves the limit alone).
    pub fn capped(self, max: u64) -> Self {
        if max == 0 {
            return self;
        }
        Self {
            page: self.page,
            limit: self.limit.min(max),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata attached to every page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-based).
    pub current_page: u64,
    /// Total number of pages (`0` when there are no records).
    pub total_pages: u64,
    /// Total number of records matching the filter.
    pub total_records: u64,
    /// Number of items per page.
    pub limit: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Compute the metadata for `current_page` given the total record count.
    pub fn compute(current_page: u64, limit: u64, total_records: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_records.div_ceil(limit)
        };
        Self {
            current_page,
            total_pages,
            total_records,
            limit,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The rows on this page.
    pub rows: Vec<T>,
    /// Pagination metadata.
    pub pagination: Pagination,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(rows: Vec<T>, page: &PageRequest, total_records: u64) -> Self {
        Self {
            rows,
            pagination: Pagination::compute(page.page, page.limit, total_records),
        }
    }
}
