use serde::Serialize;

use crate::pagination::ListResult;

/// Message a table shows when the search matched nothing.
pub const EMPTY_LIST_MESSAGE: &str = "No records found";

/// Data required to render one list page.
#[derive(Debug, Serialize)]
pub struct ListPageData<T> {
    /// Current page of rows plus pagination metadata.
    pub result: ListResult<T>,
    /// Search query echoed back to the view when present.
    pub search_query: Option<String>,
    /// Set when the table must show its empty state.
    pub empty_message: Option<&'static str>,
}

impl<T> ListPageData<T> {
    pub fn new(result: ListResult<T>, search_query: Option<String>) -> Self {
        let empty_message = result.is_empty().then_some(EMPTY_LIST_MESSAGE);
        Self {
            result,
            search_query,
            empty_message,
        }
    }
}
