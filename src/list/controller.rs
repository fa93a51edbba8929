//! Client-side search, sort and pagination over a fetched snapshot.

use crate::domain::record::ListRecord;
use crate::domain::toggle::Togglable;
use crate::domain::types::EntityId;
use crate::list::query::{ListQuery, SortDirection};
use crate::pagination::{ListResult, clamp_page, total_pages};

/// Keeps the records where any of `fields` contains `term`, ignoring case.
///
/// An empty or whitespace-only term keeps everything. Relative order is
/// preserved.
pub fn filter<'a, T, S>(items: &'a [T], term: &str, fields: &[S]) -> Vec<&'a T>
where
    T: ListRecord,
    S: AsRef<str>,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                item.field(field.as_ref())
                    .search_text()
                    .is_some_and(|text| text.contains(&needle))
            })
        })
        .collect()
}

/// Stable sort by the value stored under `key`.
pub fn sort<T: ListRecord>(items: &mut [T], key: &str, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = a.field(key).compare(&b.field(key));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

/// Returns the `page`-th window of `page_size` items (1-based).
///
/// Pages past the end yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Identifies one snapshot fetch so late responses can be discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Owns one list page's records and the query applied to them.
#[derive(Debug)]
pub struct ListDataController<T> {
    records: Vec<T>,
    search_fields: Vec<String>,
    query: ListQuery,
    latest_ticket: u64,
}

impl<T: ListRecord> ListDataController<T> {
    pub fn new<S: Into<String>>(
        search_fields: impl IntoIterator<Item = S>,
        page_size: usize,
    ) -> Self {
        Self {
            records: Vec::new(),
            search_fields: search_fields.into_iter().map(Into::into).collect(),
            query: ListQuery::new(page_size),
            latest_ticket: 0,
        }
    }

    pub fn with_records(mut self, records: Vec<T>) -> Self {
        self.records = records;
        self
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [T] {
        &mut self.records
    }

    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Replaces the whole snapshot, e.g. after a refetch.
    pub fn replace_records(&mut self, records: Vec<T>) {
        self.records = records;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.query.set_search_term(term);
    }

    pub fn set_sort(&mut self, key: impl Into<String>, direction: SortDirection) {
        self.query.set_sort(key, direction);
    }

    pub fn toggle_sort(&mut self, key: impl Into<String>) {
        self.query.toggle_sort(key);
    }

    pub fn clear_sort(&mut self) {
        self.query.clear_sort();
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.set_page(page);
    }

    /// Applies a whole query at once, e.g. one parsed from a request.
    pub fn apply_query(&mut self, query: ListQuery) {
        self.query = query;
    }

    /// Derives the rows to display for the current query.
    ///
    /// The page is clamped into range, so a page left over from a longer
    /// result shows the last page instead of nothing.
    pub fn view(&self) -> ListResult<&T> {
        let mut matched = filter(&self.records, self.query.search_term(), &self.search_fields);

        if let Some(order) = self.query.sort() {
            sort(&mut matched, &order.key, order.direction);
        }

        let total_count = matched.len();
        let page_size = self.query.page_size();
        let page = clamp_page(self.query.page(), total_pages(total_count, page_size));
        let items = paginate(&matched, page, page_size).to_vec();

        ListResult::new(items, page, total_count, page_size)
    }

    /// Registers a new fetch; only its response may replace the snapshot.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        FetchTicket(self.latest_ticket)
    }

    /// Installs fetched records unless a newer fetch was started meanwhile.
    ///
    /// Returns whether the records were applied.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, records: Vec<T>) -> bool {
        if ticket.0 != self.latest_ticket {
            log::debug!(
                "Discarding stale fetch {} (latest is {})",
                ticket.0,
                self.latest_ticket
            );
            return false;
        }
        self.records = records;
        true
    }
}

impl<T: ListRecord + Togglable> ListDataController<T> {
    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|r| r.entity_id() == id)
    }
}
