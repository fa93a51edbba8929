//! Shared list and status-toggle logic for the facilities back office.
//!
//! Every list page fetches a collection once, then searches, sorts and pages
//! it locally through [`list::ListDataController`]. Row switches go through
//! [`services::toggle::toggle_status`], which updates the row optimistically
//! and rolls it back when the backend refuses.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod list;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod services;
