//! REST access to back-office collections.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::envelope::Envelope;
use crate::client::errors::ClientResult;
use crate::client::query::RemoteQuery;
use crate::domain::resource::ResourceDescriptor;
use crate::domain::types::EntityId;

pub mod envelope;
pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod query;

pub use http::HttpResourceClient;

#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// `GET {base}/{collection}.json` with the given query parameters.
    async fn fetch_collection(
        &self,
        resource: &ResourceDescriptor,
        query: &RemoteQuery,
    ) -> ClientResult<Envelope>;

    /// Writes `body` to one member and returns the echoed entity, if any.
    async fn update_fields(
        &self,
        resource: &ResourceDescriptor,
        id: EntityId,
        body: Value,
    ) -> ClientResult<Option<Value>>;
}
