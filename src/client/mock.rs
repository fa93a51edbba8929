//! Mock REST client for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;

use crate::client::ResourceClient;
use crate::client::envelope::Envelope;
use crate::client::errors::ClientResult;
use crate::client::query::RemoteQuery;
use crate::domain::resource::ResourceDescriptor;
use crate::domain::types::EntityId;

mock! {
    pub ResourceClient {}

    #[async_trait]
    impl ResourceClient for ResourceClient {
        async fn fetch_collection(
            &self,
            resource: &ResourceDescriptor,
            query: &RemoteQuery,
        ) -> ClientResult<Envelope>;

        async fn update_fields(
            &self,
            resource: &ResourceDescriptor,
            id: EntityId,
            body: Value,
        ) -> ClientResult<Option<Value>>;
    }
}
