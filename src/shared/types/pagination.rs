use chrono::{DateTime, Utc};

/// Default page size for pickup point listings
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: u64 = 30;

/// Filter applied to pickup point listings.
///
/// The date bounds apply to reception `date_time` and are inclusive.
/// A pickup point matches when at least one of its receptions falls
/// inside the range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PvzFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub page: u64,
    pub limit: u64,
}

impl PvzFilter {
    pub fn new(
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
        page: Option<u64>,
        limit: Option<u64>,
    ) -> Self {
        let (page, limit) = crate::shared::validations::validate_pagination(page, limit);
        Self {
            start_date,
            end_date,
            page,
            limit,
        }
    }

    pub fn has_date_range(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1) * self.limit
    }
}

/// Paginated response wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, limit: u64) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
