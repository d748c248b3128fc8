//! Page-number paging for specification queries.

use serde::{Deserialize, Serialize};

use crudkit_core::types::Sort;

/// A zero-based page number, page size and ordering.
///
/// Unlike [`PageRequest`](crudkit_core::types::PageRequest), whose index is
/// a row offset, `page` here counts whole pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    pub page: u64,
    pub size: u64,
    #[serde(default)]
    pub sort: Sort,
}

impl Pageable {
    pub fn of(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let total_pages = if pageable.size == 0 {
            0
        } else {
            total_elements.div_ceil(pageable.size)
        };
        Self {
            content,
            page: pageable.page,
            size: pageable.size,
            total_elements,
            total_pages,
        }
    }

    /// Map page contents, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], &Pageable::of(0, 3), 7);
        assert_eq!(page.total_pages, 3);
        assert_eq!(Pageable::of(2, 3).offset(), 6);
    }

    #[test]
    fn test_zero_size_has_no_pages() {
        let page: Page<u8> = Page::new(Vec::new(), &Pageable::of(0, 0), 4);
        assert_eq!(page.total_pages, 0);
    }
}
