use serde::Serialize;

/// Number of pages needed to show `total` items `limit` at a time.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Server-reported window position of the displayed lead list.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: usize,
    pub limit: usize,
    /// Leads matching the current filters across all pages.
    pub total: usize,
    pub total_pages: usize,
}

impl PaginationMeta {
    /// Builds metadata with `total_pages` derived from `total` and `limit`.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }

    /// Accounts for one lead removed locally.
    ///
    /// The current page is left as is even when it no longer exists.
    pub fn record_deletion(&mut self) {
        self.total = self.total.saturating_sub(1);
        self.total_pages = total_pages(self.total, self.limit);
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page links to render: `Some(page)` entries with `None` marking gaps.
    pub fn page_window(&self) -> Vec<Option<usize>> {
        let current_page = if self.page == 0 { 1 } else { self.page };
        get_pages(self.total_pages, current_page, 2, 2, 4, 2)
    }
}
