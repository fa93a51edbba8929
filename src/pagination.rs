use serde::Serialize;

/// Default number of rows a list page shows.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Shape of the page-link strip rendered under a table: the first and last
/// page plus a run of `visible` pages starting `before` the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub visible: usize,
    pub before: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            visible: 5,
            before: 2,
        }
    }
}

impl PageWindow {
    /// Page numbers to link, with `None` marking an elided run.
    ///
    /// Lists that fit in the window show every page. Near the end the run
    /// is cut short at the last page rather than shifted back.
    pub fn links(&self, total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
        let visible = self.visible.max(1);
        if total_pages <= visible {
            return (1..=total_pages).map(Some).collect();
        }

        let start = current_page.saturating_sub(self.before).max(1);
        let end = (start + visible - 1).min(total_pages);

        let mut links = Vec::with_capacity(visible + 4);
        if start > 1 {
            links.push(Some(1));
            if start > 2 {
                links.push(None);
            }
        }
        links.extend((start..=end).map(Some));
        if end < total_pages {
            if end + 1 < total_pages {
                links.push(None);
            }
            links.push(Some(total_pages));
        }
        links
    }
}

/// Number of pages needed for `total_count` rows. Zero rows means zero pages.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Clamps a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page of a filtered, sorted list plus the metadata a table needs.
#[derive(Debug, Serialize, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
    pub pages: Vec<Option<usize>>,
}

impl<T> ListResult<T> {
    pub fn new(items: Vec<T>, page: usize, total_count: usize, page_size: usize) -> Self {
        let total_pages = total_pages(total_count, page_size);
        let page = clamp_page(page, total_pages);

        let pages = PageWindow::default().links(total_pages, page);

        Self {
            items,
            total_count,
            total_pages,
            page,
            page_size,
            pages,
        }
    }

    /// True when nothing matched and the table should show its empty state.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Maps the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_pages: self.total_pages,
            page: self.page,
            page_size: self.page_size,
            pages: self.pages,
        }
    }
}
