//! Page request and page envelope primitives shared by address book listings.
//!
//! Listings are numbered from 1. A [`PageRequest`] validates the requested
//! page and page size once, so adapters can translate it into an
//! offset/limit pair without re-checking bounds. A [`Page`] carries one slice
//! of results together with the total item count needed to render
//! navigation.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 5).expect("valid page request");
//! assert_eq!(request.offset(), 5);
//!
//! let page = Page::new(vec![6, 7, 8, 9, 10], request, 12);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.has_next());
//! ```

use serde::Serialize;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Pages are numbered from 1.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// The page size must be between 1 and [`MAX_PAGE_SIZE`].
    #[error("page size must be between 1 and {max}, got {actual}")]
    PageSizeOutOfRange {
        /// Maximum accepted page size.
        max: u32,
        /// Page size supplied by the caller.
        actual: u32,
    },
}

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a page request for the 1-based `page` holding `page_size` items.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::PageOutOfRange`] when `page` is zero and
    /// [`PaginationError::PageSizeOutOfRange`] when `page_size` is zero or
    /// exceeds [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::PageOutOfRange);
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeOutOfRange {
                max: MAX_PAGE_SIZE,
                actual: page_size,
            });
        }
        Ok(Self { page, page_size })
    }

    /// Request the first page using [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page in store order.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Number of items to fetch for this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results plus the totals needed for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    page_size: u32,
    total_items: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the fetched `items` and the overall item count.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total_items,
        }
    }

    /// An empty page, as returned for a store with no rows.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total number of items across every page.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages needed to show every item.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_items.div_ceil(u64::from(self.page_size.max(1)))
    }

    /// Whether a later page holds more items.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Convert every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}
