//! Page requests and the page wrapper returned by list queries.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 5;
pub const DEFAULT_NAVIGATE_PAGES: u64 = 5;

/// Which page to load, passed explicitly to the list query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page_num: u64,
    pub page_size: u64,
    pub navigate_pages: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// Page numbers are 1-based; zero values are raised to 1.
    pub fn new(page_num: u64, page_size: u64) -> Self {
        Self {
            page_num: page_num.max(1),
            page_size: page_size.max(1),
            navigate_pages: DEFAULT_NAVIGATE_PAGES,
        }
    }

    pub fn with_navigate_pages(mut self, navigate_pages: u64) -> Self {
        self.navigate_pages = navigate_pages.max(1);
        self
    }

    pub fn pages_for(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size)
    }

    /// The requested page clamped into `1..=max(pages, 1)`.
    pub fn resolve(&self, pages: u64) -> u64 {
        self.page_num.clamp(1, pages.max(1))
    }
}

/// One page of rows plus the metadata a pager needs to render itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo<T> {
    pub page_num: u64,
    pub page_size: u64,
    pub size: u64,
    pub start_row: u64,
    pub end_row: u64,
    pub total: u64,
    pub pages: u64,
    pub list: Vec<T>,
    pub pre_page: u64,
    pub next_page: u64,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub navigate_pages: u64,
    pub navigatepage_nums: Vec<u64>,
    pub navigate_first_page: u64,
    pub navigate_last_page: u64,
}

impl<T> PageInfo<T> {
    /// Wrap `list`, the rows of the resolved page, for a result set of
    /// `total` rows.
    pub fn new(request: PageRequest, total: u64, list: Vec<T>) -> Self {
        let pages = request.pages_for(total);
        let page_num = request.resolve(pages);
        let size = list.len() as u64;
        let (start_row, end_row) = if size == 0 {
            (0, 0)
        } else {
            let start = (page_num - 1) * request.page_size + 1;
            (start, start + size - 1)
        };
        let navigatepage_nums = navigate_window(page_num, pages, request.navigate_pages);
        Self {
            page_num,
            page_size: request.page_size,
            size,
            start_row,
            end_row,
            total,
            pages,
            list,
            pre_page: if page_num > 1 { page_num - 1 } else { 0 },
            next_page: if page_num < pages { page_num + 1 } else { 0 },
            is_first_page: page_num == 1,
            is_last_page: page_num == pages,
            has_previous_page: page_num > 1,
            has_next_page: page_num < pages,
            navigate_pages: request.navigate_pages,
            navigate_first_page: navigatepage_nums.first().copied().unwrap_or(0),
            navigate_last_page: navigatepage_nums.last().copied().unwrap_or(0),
            navigatepage_nums,
        }
    }
}

/// `width` consecutive page numbers centered on `page_num`, shifted to stay
/// inside `1..=pages`.
fn navigate_window(page_num: u64, pages: u64, width: u64) -> Vec<u64> {
    if pages <= width {
        return (1..=pages).collect();
    }
    let half = width / 2;
    if page_num <= half {
        (1..=width).collect()
    } else if page_num + half > pages {
        (pages - width + 1..=pages).collect()
    } else {
        let start = page_num - half;
        (start..start + width).collect()
    }
}
