//! Search, sort and pagination shared by every list page.

pub mod controller;
pub mod query;

pub use controller::{FetchTicket, ListDataController, filter, paginate, sort};
pub use query::{ListQuery, SortDirection, SortOrder};
