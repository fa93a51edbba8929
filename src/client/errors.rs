use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Backend responded with {status}")]
    Status { status: StatusCode, body: Option<Value> },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// HTTP status code when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(status.as_u16()),
            _ => None,
        }
    }

    /// First human-readable error the backend put in its response body.
    ///
    /// Accepts `{"errors": ["..."]}`, `{"errors": {"field": ["..."]}}`,
    /// `{"errors": "..."}` and `{"error": "..."}`. An `errors` key with
    /// nothing readable in it falls through to `error`.
    pub fn backend_message(&self) -> Option<String> {
        let ClientError::Status {
            body: Some(body), ..
        } = self
        else {
            return None;
        };

        ["errors", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(first_message))
    }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items.iter().find_map(first_message),
        Value::Object(map) => map.iter().find_map(|(field, messages)| {
            first_message(messages).map(|message| format!("{field} {message}"))
        }),
        _ => None,
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_builder() {
            ClientError::Config(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<TypeConstraintError> for ClientError {
    fn from(err: TypeConstraintError) -> Self {
        ClientError::Config(err.to_string())
    }
}
