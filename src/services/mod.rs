//! Service layer coordinating list loading and status toggles.

use thiserror::Error;

use crate::client::errors::ClientError;
use crate::domain::types::TypeConstraintError;
use crate::dto::notification::Notification;
use crate::forms::FormError;

pub mod list;
pub mod toggle;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Record not found")]
    NotFound,

    /// The record has no switch with this name.
    #[error("Unknown status field: {0}")]
    UnknownField(String),

    #[error("Form error: {0}")]
    Form(String),

    #[error("Type constraint violation: {0}")]
    TypeConstraint(String),

    /// The backend refused the change; the message is meant for the user.
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Backend error: {0}")]
    Client(ClientError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        match err.status() {
            Some(401 | 403) => ServiceError::Unauthorized,
            Some(404) => ServiceError::NotFound,
            _ => ServiceError::Client(err),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}

/// Converts any service failure into the toast shown to the user.
///
/// Every error is recoverable: the user can simply retry the action.
pub fn notification_for(err: &ServiceError) -> Notification {
    match err {
        ServiceError::Unauthorized => {
            Notification::error("You are not authorized to perform this action.")
        }
        ServiceError::NotFound => Notification::error("Record not found."),
        ServiceError::UnknownField(field) => {
            Notification::error(format!("This record has no \"{field}\" switch."))
        }
        ServiceError::Form(message) | ServiceError::Rejected(message) => {
            Notification::error(message.clone())
        }
        ServiceError::TypeConstraint(message) => {
            Notification::error(format!("Invalid value: {message}"))
        }
        ServiceError::Client(ClientError::Transport(_) | ClientError::Timeout(_)) => {
            Notification::error("Network error. Please check your connection and try again.")
        }
        ServiceError::Client(_) => Notification::error("Something went wrong. Please try again."),
    }
}
