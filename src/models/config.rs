//! Configuration model loaded from external sources.

use serde::Deserialize;
use validator::Validate;

use crate::pagination::DEFAULT_PAGE_SIZE;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Clone, Debug, Deserialize, Validate)]
/// Connection settings handed to the REST client.
pub struct ClientConfig {
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub access_token: String,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,
    #[serde(default = "default_request_timeout_secs")]
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: String::new(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
