//! Request forms validated before any backend call is made.

use thiserror::Error;
use validator::ValidationErrors;

pub mod list;
pub mod toggle;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid record id")]
    InvalidId,

    #[error("invalid sort direction")]
    InvalidSortDirection,
}
