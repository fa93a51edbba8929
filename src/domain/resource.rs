//! Addressing information for a REST collection.

use serde::{Deserialize, Serialize};

use crate::domain::types::{ResourceName, TypeConstraintError};

/// HTTP verb used to write partial updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateMethod {
    #[default]
    Put,
    Patch,
}

/// Names a backend collection and the key its members are wrapped in.
///
/// `banners` is fetched from `banners.json` and updated through
/// `banners/{id}.json` with a `{ "banner": { ... } }` body. Some endpoints,
/// e.g. `facility_bookings`, take the fields at the top level instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub collection: ResourceName,
    pub member: ResourceName,
    pub update_method: UpdateMethod,
    pub wrap_member: bool,
}

impl ResourceDescriptor {
    pub const fn from_static(collection: &'static str, member: &'static str) -> Self {
        Self {
            collection: ResourceName::from_static(collection),
            member: ResourceName::from_static(member),
            update_method: UpdateMethod::Put,
            wrap_member: true,
        }
    }

    /// Builds a descriptor from runtime input.
    ///
    /// Without an explicit member name the collection's trailing `s` is
    /// dropped (`noticeboards` -> `noticeboard`).
    pub fn new(collection: &str, member: Option<&str>) -> Result<Self, TypeConstraintError> {
        let collection = ResourceName::new(collection)?;
        let member = match member {
            Some(member) => ResourceName::new(member)?,
            None => {
                let singular = collection
                    .as_str()
                    .strip_suffix('s')
                    .unwrap_or(collection.as_str());
                ResourceName::new(singular)?
            }
        };
        Ok(Self {
            collection,
            member,
            update_method: UpdateMethod::Put,
            wrap_member: true,
        })
    }

    pub const fn with_method(mut self, method: UpdateMethod) -> Self {
        self.update_method = method;
        self
    }

    /// Sends update fields without the `{ member: ... }` envelope.
    pub const fn unwrapped(mut self) -> Self {
        self.wrap_member = false;
        self
    }

    /// Key update bodies are wrapped in, if any.
    pub fn body_member(&self) -> Option<&str> {
        self.wrap_member.then_some(self.member.as_str())
    }

    /// Path of the collection index, relative to the base URL.
    pub fn collection_path(&self) -> String {
        format!("{}.json", self.collection)
    }

    /// Path of a single member, relative to the base URL.
    pub fn member_path(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}.json", self.collection, id)
    }
}

/// Typed entities bound to a fixed backend collection.
pub trait Resource {
    fn descriptor() -> ResourceDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_defaults_to_singular_collection() {
        let descriptor = ResourceDescriptor::new("noticeboards", None).expect("valid");
        assert_eq!(descriptor.member.as_str(), "noticeboard");
        assert_eq!(descriptor.collection_path(), "noticeboards.json");
        assert_eq!(descriptor.member_path(9), "noticeboards/9.json");
    }

    #[test]
    fn explicit_member_wins() {
        let descriptor = ResourceDescriptor::new("faqs", Some("faq_item")).expect("valid");
        assert_eq!(descriptor.member.as_str(), "faq_item");
        assert_eq!(descriptor.update_method, UpdateMethod::Put);
    }

    #[test]
    fn unwrapped_resources_have_no_body_member() {
        let bookings = ResourceDescriptor::from_static("facility_bookings", "facility_booking");
        assert_eq!(bookings.body_member(), Some("facility_booking"));
        assert_eq!(bookings.unwrapped().body_member(), None);
    }

    #[test]
    fn invalid_collection_is_rejected() {
        assert!(ResourceDescriptor::new("a/b", None).is_err());
    }
}
