//! DTOs that bridge services with list views.

pub mod list;
pub mod notification;
