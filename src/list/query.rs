use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;
use crate::pagination::DEFAULT_PAGE_SIZE;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub key: String,
    pub direction: SortDirection,
}

/// Search, sort and page state of a list view.
///
/// `page` never drops below 1 and returns to 1 whenever the search term or
/// the sort key changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    search_term: String,
    sort: Option<SortOrder>,
    page: usize,
    page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    /// A zero page size is bumped to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.set_search_term(term);
        self
    }

    pub fn sort_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.set_sort(key, direction);
        self
    }

    pub fn paginate(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&SortOrder> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Sets the sort column. Changing the key resets the page, flipping the
    /// direction of the current key does not.
    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        let key = key.into();
        let key_changed = self.sort.as_ref().is_none_or(|current| current.key != key);
        self.sort = Some(SortOrder { key, direction });
        if key_changed {
            self.page = 1;
        }
    }

    /// Header-click behaviour: a new key sorts ascending, the same key flips.
    pub fn toggle_sort(&mut self, key: impl Into<String>) {
        let key = key.into();
        let direction = match &self.sort {
            Some(current) if current.key == key => current.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.set_sort(key, direction);
    }

    pub fn clear_sort(&mut self) {
        if self.sort.take().is_some() {
            self.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}
