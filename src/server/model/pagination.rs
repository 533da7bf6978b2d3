//! Pagination and sorting shared by every list endpoint.

use sea_orm::Order;
use serde::Deserialize;

use crate::model::api::{PaginatedDto, SortDirectionDto, SortFieldDto};

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

/// Page sizes accepted by the store and AI suggestion search endpoints.
pub const SEARCH_PAGE_SIZES: [u64; 3] = [10, 30, 50];

/// Column a list is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Page number and size plus ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u64,
    pub per_page: u64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Builds a request, clamping `per_page` into `1..=MAX_PER_PAGE`.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
            sort: SortField::default(),
            direction: SortDirection::Desc,
        }
    }

    /// Builds a search request whose page size must be one of [`SEARCH_PAGE_SIZES`].
    ///
    /// Any other size falls back to [`DEFAULT_PER_PAGE`].
    pub fn for_search(page: u64, per_page: u64) -> Self {
        let per_page = if SEARCH_PAGE_SIZES.contains(&per_page) {
            per_page
        } else {
            DEFAULT_PER_PAGE
        };

        Self::new(page, per_page)
    }

    pub fn sorted(mut self, sort: SortField, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PER_PAGE)
    }
}

/// Query string accepted by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    #[serde(default)]
    pub sort: SortFieldDto,
    #[serde(default)]
    pub direction: SortDirectionDto,
}

fn default_entries() -> u64 {
    DEFAULT_PER_PAGE
}

impl PaginationParams {
    pub fn into_request(self) -> PageRequest {
        PageRequest::new(self.page, self.entries).sorted(self.sort.into(), self.direction.into())
    }

    pub fn into_search_request(self) -> PageRequest {
        PageRequest::for_search(self.page, self.entries)
            .sorted(self.sort.into(), self.direction.into())
    }
}

impl From<SortFieldDto> for SortField {
    fn from(dto: SortFieldDto) -> Self {
        match dto {
            SortFieldDto::CreatedAt => Self::CreatedAt,
            SortFieldDto::UpdatedAt => Self::UpdatedAt,
        }
    }
}

impl From<SortDirectionDto> for SortDirection {
    fn from(dto: SortDirectionDto) -> Self {
        match dto {
            SortDirectionDto::Asc => Self::Asc,
            SortDirectionDto::Desc => Self::Desc,
        }
    }
}

/// One page of domain models.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
            total_pages: total.div_ceil(request.per_page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }

    pub fn into_dto<D>(self, f: impl FnMut(T) -> D) -> PaginatedDto<D> {
        let page = self.map(f);
        PaginatedDto {
            items: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            total_pages: page.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_size() {
        assert_eq!(PageRequest::new(0, 0).per_page, 1);
        assert_eq!(PageRequest::new(0, 1_000).per_page, MAX_PER_PAGE);
        assert_eq!(PageRequest::new(0, 25).per_page, 25);
    }

    #[test]
    fn search_page_size_falls_back_to_default() {
        assert_eq!(PageRequest::for_search(0, 30).per_page, 30);
        assert_eq!(PageRequest::for_search(0, 25).per_page, DEFAULT_PER_PAGE);
    }

    #[test]
    fn counts_partial_last_page() {
        let page = Page::new(vec![1, 2, 3], 21, &PageRequest::new(2, 10));
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], 0, &PageRequest::default());
        assert_eq!(empty.total_pages, 0);
    }
}
