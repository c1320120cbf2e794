//! # Pagination
//!
//! Offset windows over a filtered row set, and the metadata derived from a
//! store-reported row count.
//!
//! ## Page Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  page_size = 10, total_count = 23                                       │
//! │                                                                         │
//! │  page 1 → offset  0, rows  1..=10                                       │
//! │  page 2 → offset 10, rows 11..=20                                       │
//! │  page 3 → offset 20, rows 21..=23                                       │
//! │                                                                         │
//! │  total_pages = ceil(23 / 10) = 3        (0 when total_count == 0)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`PageRequest`] can only be built with `page >= 1` and
//! `page_size >= 1`. It is NOT clamped against the row
//! count; a page past the end simply yields no rows. Callers that want to
//! stay in range use [`PageInfo::clamp_page`].

use serde::Serialize;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Page Request
// =============================================================================

/// A 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TS)]
#[ts(export)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a page window.
    ///
    /// ## Errors
    /// - `page == 0` → `OutOfRange`
    /// - `page_size == 0` → `OutOfRange`
    pub fn new(page: u32, page_size: u32) -> Result<Self, ValidationError> {
        if page == 0 {
            return Err(ValidationError::OutOfRange {
                field: "page".to_string(),
                min: 1,
                max: i64::from(u32::MAX),
            });
        }

        if page_size == 0 {
            return Err(ValidationError::OutOfRange {
                field: "page_size".to_string(),
                min: 1,
                max: i64::from(u32::MAX),
            });
        }

        Ok(PageRequest { page, page_size })
    }

    /// Page 1 with the given page size.
    pub fn first(page_size: u32) -> Result<Self, ValidationError> {
        Self::new(1, page_size)
    }

    /// Returns the 1-based page number.
    #[inline]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[inline]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of rows to skip: `(page - 1) * page_size`.
    #[inline]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Maximum number of rows to return.
    #[inline]
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }

    /// Same page size, different page.
    pub fn with_page(&self, page: u32) -> Result<Self, ValidationError> {
        Self::new(page, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Page Info
// =============================================================================

/// `ceil(total_count / page_size)`, or 0 for an empty row set.
pub fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

/// Pagination metadata for one fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    /// Rows matching the filter, independent of paging.
    pub total_count: u64,
    pub total_pages: u64,
}

impl PageInfo {
    /// Derives metadata from the request and the store's row count.
    pub fn new(request: PageRequest, total_count: u64) -> Self {
        PageInfo {
            page: request.page(),
            page_size: request.page_size(),
            total_count,
            total_pages: total_pages(total_count, request.page_size()),
        }
    }

    /// Returns true if a later page holds rows.
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Returns true if this is not the first page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns true if `page` is within `1..=max(1, total_pages)`.
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && u64::from(page) <= self.total_pages.max(1)
    }

    /// Clamps `page` into `1..=max(1, total_pages)`.
    ///
    /// ## Usage
    /// After deleting the only row on the last page, the caller moves back:
    /// ```rust
    /// use clientele_core::pagination::{PageInfo, PageRequest};
    ///
    /// let info = PageInfo::new(PageRequest::new(3, 10).unwrap(), 20);
    /// assert_eq!(info.clamp_page(3), 2);
    /// ```
    pub fn clamp_page(&self, page: u32) -> u32 {
        let last = u32::try_from(self.total_pages.max(1)).unwrap_or(u32::MAX);
        page.clamp(1, last)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
