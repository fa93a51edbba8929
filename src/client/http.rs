use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Request};
use serde_json::Value;

use crate::client::envelope::{Envelope, member_from_body};
use crate::client::errors::{ClientError, ClientResult};
use crate::client::query::RemoteQuery;
use crate::client::ResourceClient;
use crate::domain::resource::{ResourceDescriptor, UpdateMethod};
use crate::domain::types::{AccessToken, BaseUrl, EntityId};
use crate::models::config::ClientConfig;

/// `reqwest`-backed client for the back-office REST API.
///
/// Base URL and token are injected at construction; nothing is read from
/// ambient state per request.
#[derive(Clone, Debug)]
pub struct HttpResourceClient {
    http: reqwest::Client,
    base_url: BaseUrl,
    token: AccessToken,
}

impl HttpResourceClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = BaseUrl::new(config.base_url.as_str())?;
        let token = AccessToken::new(config.access_token.as_str())?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Builds `GET {base}/{collection}.json?{query}`.
    pub fn collection_request(
        &self,
        resource: &ResourceDescriptor,
        query: &RemoteQuery,
    ) -> ClientResult<Request> {
        let url = self.base_url.join(&resource.collection_path());
        let request = self
            .http
            .get(url)
            .query(query.pairs())
            .bearer_auth(self.token.as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .build()?;
        Ok(request)
    }

    /// Builds `PUT|PATCH {base}/{collection}/{id}.json` with a JSON body.
    pub fn update_request(
        &self,
        resource: &ResourceDescriptor,
        id: EntityId,
        body: &Value,
    ) -> ClientResult<Request> {
        let method = match resource.update_method {
            UpdateMethod::Put => Method::PUT,
            UpdateMethod::Patch => Method::PATCH,
        };
        let url = self.base_url.join(&resource.member_path(id));
        let request = self
            .http
            .request(method, url)
            .bearer_auth(self.token.as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body)
            .build()?;
        Ok(request)
    }

    /// Sends the request and returns the raw body of a 2xx response.
    async fn send(&self, request: Request) -> ClientResult<Vec<u8>> {
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await.map_err(|err| {
            log::error!("{method} {url} failed: {err}");
            ClientError::from(err)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            log::error!("{method} {url} returned {status}");
            return Err(ClientError::Status {
                status,
                body: serde_json::from_slice(&body).ok(),
            });
        }

        log::debug!("{method} {url} returned {status}");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn fetch_collection(
        &self,
        resource: &ResourceDescriptor,
        query: &RemoteQuery,
    ) -> ClientResult<Envelope> {
        let request = self.collection_request(resource, query)?;
        let body = self.send(request).await?;
        let value: Value = serde_json::from_slice(&body)?;
        Envelope::from_value(value, resource.collection.as_str())
    }

    async fn update_fields(
        &self,
        resource: &ResourceDescriptor,
        id: EntityId,
        body: Value,
    ) -> ClientResult<Option<Value>> {
        let request = self.update_request(resource, id, &body)?;
        let response = self.send(request).await?;
        Ok(member_from_body(&response, resource.member.as_str()))
    }
}
