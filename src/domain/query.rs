use crate::domain::filter::Filters;
use crate::domain::types::PageSize;

/// Page, page size and filters that decide which leads are fetched.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState {
    /// 1-based page number.
    pub page: usize,
    pub page_size: PageSize,
    pub filters: Filters,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            filters: Filters::default(),
        }
    }
}

impl QueryState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Applies `query_override` on top of this state.
    ///
    /// An unspecified page falls back to the first page; page size and filters
    /// fall back to the current ones.
    pub fn merged(&self, query_override: QueryOverride) -> Self {
        Self {
            page: query_override.page.unwrap_or(1).max(1),
            page_size: query_override.page_size.unwrap_or(self.page_size),
            filters: query_override
                .filters
                .unwrap_or_else(|| self.filters.clone()),
        }
    }
}

/// Partial query supplied to a fetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryOverride {
    pub page: Option<usize>,
    pub page_size: Option<PageSize>,
    pub filters: Option<Filters>,
}

impl QueryOverride {
    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = Some(filters);
        self
    }
}
