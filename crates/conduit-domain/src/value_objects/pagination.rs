//! Pagination value objects for list queries
//!
//! Pages are zero-based: the first page is `0` and the last page is
//! `total_pages - 1` (or `0` when there is nothing to page through).

use serde::{Deserialize, Serialize};

/// Requested page of a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Zero-based page index
    pub page_number: usize,
    /// Maximum number of items per page
    pub page_size: usize,
}

impl PageRequest {
    /// Create a page request
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Number of items to skip before this page starts
    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }
}

/// Position of a page within the full result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Number of items across all pages
    pub total_elements: usize,
    /// Page size used to split the result set
    pub page_size: usize,
    /// Zero-based index of this page
    pub page_number: usize,
}

impl PageInfo {
    /// Total number of pages; zero when the page size is zero
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.page_size)
        }
    }

    /// Index of the first page (always zero)
    pub fn first_page(&self) -> usize {
        0
    }

    /// Index of the last page
    pub fn last_page(&self) -> usize {
        self.total_pages().saturating_sub(1)
    }

    /// Whether a page exists before this one
    pub fn has_prev_page(&self) -> bool {
        self.page_number >= 1
    }

    /// Whether a page exists after this one
    pub fn has_next_page(&self) -> bool {
        self.page_number < self.last_page()
    }

    /// Previous page index, clamped to the first page
    pub fn prev_page(&self) -> usize {
        if self.has_prev_page() {
            self.page_number - 1
        } else {
            self.first_page()
        }
    }

    /// Next page index, clamped to the last page
    pub fn next_page(&self) -> usize {
        if self.has_next_page() {
            self.page_number + 1
        } else {
            self.last_page()
        }
    }
}

/// One page of items plus its position in the full result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Pagination metadata
    #[serde(rename = "pagination")]
    pub info: PageInfo,
}

impl<T: Clone> Page<T> {
    /// Cut the requested page out of a full, already ordered result set
    pub fn from_slice(all: &[T], request: PageRequest) -> Self {
        let items = all
            .iter()
            .skip(request.offset())
            .take(request.page_size)
            .cloned()
            .collect();

        Self {
            items,
            info: PageInfo {
                total_elements: all.len(),
                page_size: request.page_size,
                page_number: request.page_number,
            },
        }
    }
}

impl<T> Page<T> {
    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let info = PageInfo {
            total_elements: 11,
            page_size: 5,
            page_number: 0,
        };
        assert_eq!(info.total_pages(), 3);
        assert_eq!(info.last_page(), 2);
    }

    #[test]
    fn test_zero_page_size_has_no_pages() {
        let info = PageInfo {
            total_elements: 10,
            page_size: 0,
            page_number: 0,
        };
        assert_eq!(info.total_pages(), 0);
        assert_eq!(info.last_page(), 0);
        assert!(!info.has_next_page());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let first = PageInfo {
            total_elements: 10,
            page_size: 5,
            page_number: 0,
        };
        assert!(!first.has_prev_page());
        assert_eq!(first.prev_page(), 0);
        assert!(first.has_next_page());
        assert_eq!(first.next_page(), 1);

        let last = PageInfo {
            page_number: 1,
            ..first
        };
        assert!(last.has_prev_page());
        assert_eq!(last.prev_page(), 0);
        assert!(!last.has_next_page());
        assert_eq!(last.next_page(), 1);
    }

    #[test]
    fn test_page_from_slice() {
        let all: Vec<u32> = (1..=7).collect();

        let page = Page::from_slice(&all, PageRequest::new(1, 3));
        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.info.total_elements, 7);
        assert_eq!(page.info.total_pages(), 3);

        let tail = Page::from_slice(&all, PageRequest::new(2, 3));
        assert_eq!(tail.items, vec![7]);

        let beyond = Page::from_slice(&all, PageRequest::new(9, 3));
        assert!(beyond.is_empty());
    }
}
