//! Strongly-typed value objects used by list records and the REST client.
//!
//! These wrappers enforce basic invariants (positive identifiers, non-empty
//! tokens, well-formed resource names and URLs) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
}

/// Unique, stable identifier of a backend entity.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "i64")]
pub struct EntityId(i64);

impl EntityId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i64` backing this identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for EntityId {
    type Error = TypeConstraintError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for i64 {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bearer token attached to every backend call.
///
/// The token is never printed: `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let inner = NonEmptyString::new(value)?;
        Ok(Self(inner.into_inner()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Backend base URL without a trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Ensures a trimmed URL is non-empty and well formed before wrapping.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let url = NonEmptyString::new(value)?;

        if !url.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl);
        }

        Ok(Self(url.as_str().trim_end_matches('/').to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Joins a relative path onto the base URL.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl Display for BaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// REST resource segment such as `banners` or `banner`.
///
/// Only lowercase ASCII letters, digits and underscores are accepted so the
/// value can be spliced into URL paths and JSON keys without escaping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceName(Cow<'static, str>);

impl ResourceName {
    /// Wraps a compile-time resource name declared by a typed entity.
    pub const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Validates a resource name supplied at runtime.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let inner = NonEmptyString::new(value)?.into_inner();
        let valid = inner
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(TypeConstraintError::InvalidValue(inner));
        }
        Ok(Self(Cow::Owned(inner)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ResourceName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ResourceName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_rejects_non_positive_values() {
        assert_eq!(EntityId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(EntityId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(EntityId::new(7).map(EntityId::get), Ok(7));
    }

    #[test]
    fn entity_id_deserializes_through_validation() {
        let id: EntityId = serde_json::from_str("12").expect("valid id");
        assert_eq!(id.get(), 12);
        assert!(serde_json::from_str::<EntityId>("0").is_err());
    }

    #[test]
    fn base_url_strips_trailing_slash_and_joins() {
        let url = BaseUrl::new(" https://fm.example.com/api/ ").expect("valid url");
        assert_eq!(url.as_str(), "https://fm.example.com/api");
        assert_eq!(
            url.join("/banners.json"),
            "https://fm.example.com/api/banners.json"
        );
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert_eq!(BaseUrl::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(BaseUrl::new("not a url"), Err(TypeConstraintError::InvalidUrl));
    }

    #[test]
    fn resource_name_only_accepts_path_safe_characters() {
        assert!(ResourceName::new("noticeboards").is_ok());
        assert!(ResourceName::new("survey_mappings").is_ok());
        assert!(ResourceName::new("../etc").is_err());
        assert!(ResourceName::new("Banners").is_err());
    }

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("secret-token").expect("valid token");
        assert_eq!(format!("{token:?}"), "AccessToken(***)");
        assert_eq!(token.as_str(), "secret-token");
    }
}
