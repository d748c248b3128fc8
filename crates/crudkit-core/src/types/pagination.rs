//! Pagination types for query-by-example listings.

use serde::{Deserialize, Serialize};

/// Default page size.
const DEFAULT_PAGE_SIZE: u64 = 25;

/// Request parameters for paginated queries.
///
/// `page_index` is a zero-based **row offset**, not a page number: a
/// request of `{ page_size: 10, page_index: 3 }` returns rows 3..13.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of rows to return.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Number of rows to skip.
    #[serde(default)]
    pub page_index: u64,
    /// Optional field to order by. Ordering is always descending.
    #[serde(default)]
    pub sort_field: Option<String>,
}

impl PageRequest {
    /// Create a new unsorted page request.
    pub fn new(page_size: u64, page_index: u64) -> Self {
        Self {
            page_size,
            page_index,
            sort_field: None,
        }
    }

    /// Order the page descending by `field`.
    pub fn sorted_by(mut self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.sort_field = if field.trim().is_empty() {
            None
        } else {
            Some(field)
        };
        self
    }

    /// Cap the page size at `max`.
    pub fn clamped(mut self, max: u64) -> Self {
        self.page_size = self.page_size.min(max);
        self
    }

    /// The `OFFSET` value.
    pub fn offset(&self) -> u64 {
        self.page_index
    }

    /// The `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 0,
            sort_field: None,
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
