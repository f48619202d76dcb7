//! Shared pagination types for API query parameters.
//!
//! Admin list endpoints use offset-based pagination with `skip` and `limit`.
//! Directory endpoints use page-based pagination with a fixed default page
//! size matching the dashboard's grid layout.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Default number of items to return per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum number of items that can be requested per page.
pub const MAX_LIMIT: i64 = 100;

/// Standard pagination parameters for admin list endpoints.
///
/// The `limit` is clamped to ensure it's always between 1 and 100,
/// preventing both zero-result queries and excessive data fetching.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct Pagination {
    /// Number of items to skip (default: 0)
    #[param(default = 0, minimum = 0)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub skip: Option<i64>,

    /// Maximum number of items to return (default: 10, max: 100)
    #[param(default = 10, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Get the skip value, defaulting to 0 if not specified.
    #[inline]
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Get the limit value, clamped between 1 and MAX_LIMIT.
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// Default page size for directory listings (one dashboard grid page).
pub const DIRECTORY_PAGE_SIZE: usize = 12;

/// Page-based pagination parameters for directory endpoints.
///
/// Pages are 1-indexed. A page index past the end of the filtered list
/// yields an empty page rather than being clamped; the `total_count` in the
/// response lets clients navigate back.
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DirectoryPage {
    /// 1-indexed page number (default: 1)
    #[param(default = 1, minimum = 1)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<usize>,

    /// Items per page (default: 12, max: 100)
    #[param(default = 12, minimum = 1, maximum = 100)]
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub per_page: Option<usize>,
}

impl DirectoryPage {
    /// Get the 1-indexed page number, defaulting to 1.
    #[inline]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the page size, clamped between 1 and 100.
    #[inline]
    pub fn per_page(&self) -> usize {
        self.per_page.unwrap_or(DIRECTORY_PAGE_SIZE).clamp(1, 100)
    }
}

/// Generic paginated response wrapper for list endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedResponse<T: ToSchema> {
    /// The items for the current page
    pub data: Vec<T>,
    /// Total number of items matching the query (before pagination)
    pub total_count: i64,
    /// Number of items skipped
    pub skip: i64,
    /// Maximum items returned per page
    pub limit: i64,
}

impl<T: ToSchema> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, total_count: i64, skip: i64, limit: i64) -> Self {
        Self {
            data,
            total_count,
            skip,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let p = Pagination::default();
        assert_eq!(p.skip(), 0);
        assert_eq!(p.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_clamping() {
        // Zero is clamped to 1
        let p = Pagination {
            skip: None,
            limit: Some(0),
        };
        assert_eq!(p.limit(), 1);

        // Negative is clamped to 1
        let p = Pagination {
            skip: None,
            limit: Some(-5),
        };
        assert_eq!(p.limit(), 1);

        // Over max is clamped to MAX_LIMIT
        let p = Pagination {
            skip: None,
            limit: Some(1000),
        };
        assert_eq!(p.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_skip_clamping() {
        let p = Pagination {
            skip: Some(-10),
            limit: None,
        };
        assert_eq!(p.skip(), 0);
    }

    #[test]
    fn test_directory_page_defaults() {
        let p = DirectoryPage::default();
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), DIRECTORY_PAGE_SIZE);
    }

    #[test]
    fn test_directory_page_zero_clamped() {
        let p = DirectoryPage {
            page: Some(0),
            per_page: Some(0),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.per_page(), 1);
    }
}
