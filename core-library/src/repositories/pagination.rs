//! Page windows for song listings and verse views
//!
//! Pages are 1-based. A request past the last page yields an empty `items`
//! with the real `total`, never an error.

use serde::{Deserialize, Serialize};

/// Default number of songs per page
pub const DEFAULT_SONGS_PAGE_SIZE: u32 = 10;

/// Default number of verses per page
pub const DEFAULT_VERSES_PAGE_SIZE: u32 = 2;

/// Which window of an ordered sequence to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Create a new page request
    ///
    /// A zero page or page size is replaced by page 1 and the songs default.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_library::repositories::PageRequest;
    ///
    /// let request = PageRequest::new(2, 20);
    /// assert_eq!(request.offset(), 20);
    /// ```
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: if page_size == 0 {
                DEFAULT_SONGS_PAGE_SIZE
            } else {
                page_size
            },
        }
    }

    /// Build a request from untrusted parameters.
    ///
    /// Absent or non-positive values fall back to page 1 and `default_size`.
    ///
    /// ```
    /// use core_library::repositories::PageRequest;
    ///
    /// let request = PageRequest::from_params(Some(-3), None, 2);
    /// assert_eq!(request, PageRequest::new(1, 2));
    /// ```
    pub fn from_params(page: Option<i64>, page_size: Option<i64>, default_size: u32) -> Self {
        let page = page
            .filter(|p| *p > 0)
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s > 0)
            .map(|s| u32::try_from(s).unwrap_or(u32::MAX))
            .unwrap_or(default_size.max(1));

        Self { page, page_size }
    }

    /// Items skipped before this window: `(page - 1) * page_size`
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_SONGS_PAGE_SIZE,
        }
    }
}

/// One window of results plus the size of the whole sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches across every page
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Wrap one window of results.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_library::repositories::{Page, PageRequest};
    ///
    /// let page = Page::new(vec![1, 2, 3], 25, PageRequest::new(1, 10));
    ///
    /// assert_eq!(page.total, 25);
    /// assert_eq!(page.total_pages, 3);
    /// assert!(page.has_next());
    /// ```
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let total_pages = if request.page_size == 0 {
            0
        } else {
            let pages = total.div_ceil(u64::from(request.page_size));
            u32::try_from(pages).unwrap_or(u32::MAX)
        };

        Self {
            items,
            total,
            page: request.page,
            total_pages,
            page_size: request.page_size,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
