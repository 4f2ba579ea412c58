//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a new pagination with sanitized values
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }

    /// Clamp out-of-range values into the accepted window
    pub fn validate(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(MIN_LIMIT, MAX_LIMIT);
        self
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub limit: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    /// Whether there's a next page
    pub has_next: bool,

    /// Whether there's a previous page
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = Self::calculate_total_pages(total, pagination.limit);

        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }

    /// Create an empty paginated response
    pub fn empty(pagination: Pagination) -> Self {
        Self {
            data: Vec::new(),
            page: pagination.page,
            limit: pagination.limit,
            total: 0,
            total_pages: 0,
            has_next: false,
            has_prev: false,
        }
    }

    fn calculate_total_pages(total: u64, limit: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        ((total as f64) / (limit as f64)).ceil() as u32
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }

    /// Check if the response is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the number of items in this page
    pub fn count(&self) -> usize {
        self.data.len()
    }
}

// Constants
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_calculation() {
        let pagination = Pagination::new(3, 10);
        assert_eq!(pagination.offset(), 20);
        assert_eq!(pagination.limit_i64(), 10);
    }

    #[test]
    fn test_first_page_offset_is_zero() {
        let pagination = Pagination::new(1, 25);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_page_zero_is_clamped() {
        let pagination = Pagination::new(0, 10);
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn test_limit_is_clamped_to_maximum() {
        let pagination = Pagination::new(1, 10_000);
        assert_eq!(pagination.limit, 100);
    }

    #[test]
    fn test_paginated_response_metadata() {
        let pagination = Pagination::new(2, 10);
        let response = PaginatedResponse::new(vec![1, 2, 3], pagination, 25);

        assert_eq!(response.total_pages, 3);
        assert!(response.has_next);
        assert!(response.has_prev);
        assert_eq!(response.count(), 3);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let pagination = Pagination::new(3, 10);
        let response = PaginatedResponse::new(vec![1, 2, 3, 4, 5], pagination, 25);

        assert!(!response.has_next);
        assert!(response.has_prev);
    }

    #[test]
    fn test_empty_response() {
        let response: PaginatedResponse<u32> = PaginatedResponse::empty(Pagination::default());
        assert!(response.is_empty());
        assert_eq!(response.total_pages, 0);
        assert!(!response.has_next);
        assert!(!response.has_prev);
    }
}
