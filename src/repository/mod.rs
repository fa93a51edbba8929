//! Per-list UI state remembered between page visits.
//!
//! List pages restore the page number a user left on when they navigate back.
//! Only ephemeral view state lives here; records always come from the backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub trait PageStateReader {
    /// Page last shown for the list identified by `list_key`.
    fn saved_page(&self, list_key: &str) -> Option<usize>;
}

pub trait PageStateWriter {
    fn save_page(&self, list_key: &str, page: usize);

    fn forget_page(&self, list_key: &str);
}

/// Process-local page store shared between clones.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPageStore {
    pages: Arc<Mutex<HashMap<String, usize>>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageStateReader for InMemoryPageStore {
    fn saved_page(&self, list_key: &str) -> Option<usize> {
        let pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        pages.get(list_key).copied()
    }
}

impl PageStateWriter for InMemoryPageStore {
    fn save_page(&self, list_key: &str, page: usize) {
        let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        pages.insert(list_key.to_string(), page.max(1));
    }

    fn forget_page(&self, list_key: &str) {
        let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);
        pages.remove(list_key);
    }
}
