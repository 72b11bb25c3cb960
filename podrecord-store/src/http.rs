//! HTTP document store.
//!
//! Documents are exchanged as Turtle: `GET` to fetch, `PUT` to replace.

use crate::turtle;
use crate::{AuthHook, DocumentStore, StoreError, StoreResult};
use async_trait::async_trait;
use podrecord_types::Document;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const TURTLE: &str = "text/turtle";

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpStoreConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for HttpStoreConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("podrecord/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Reads and writes Turtle documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
}

impl HttpStore {
    /// Creates a store with the given client settings.
    pub fn new(config: HttpStoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| StoreError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn request(&self, method: Method, url: &str, auth: Option<&AuthHook>) -> RequestBuilder {
        let header = auth.and_then(|hook| hook.authorization(method.as_str(), url));
        let request = self.client.request(method, url);
        match header {
            Some(value) => request.header(AUTHORIZATION, value),
            None => request,
        }
    }
}

fn check_status(url: &str, response: &Response) -> StoreResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let url = url.to_string();
    Err(match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => StoreError::NotFound(url),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::AccessDenied {
            url,
            status: status.as_u16(),
        },
        _ => StoreError::Http {
            url,
            status: status.as_u16(),
        },
    })
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn fetch(&self, url: &str, auth: Option<&AuthHook>) -> StoreResult<Document> {
        debug!("Fetching document: {}", url);

        let response = self
            .request(Method::GET, url, auth)
            .header(ACCEPT, TURTLE)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("fetch failed: {e}")))?;
        check_status(url, &response)?;

        let body = response
            .bytes()
            .await
            .map_err(|e| StoreError::Network(format!("read body failed: {e}")))?;
        turtle::parse(url, &body)
    }

    async fn save(
        &self,
        url: &str,
        document: Document,
        auth: Option<&AuthHook>,
    ) -> StoreResult<Document> {
        let document = document.persisted(url);
        let body = turtle::serialize(&document)?;
        debug!("Saving document: {} ({} bytes)", url, body.len());

        let response = self
            .request(Method::PUT, url, auth)
            .header(CONTENT_TYPE, TURTLE)
            .body(body)
            .send()
            .await
            .map_err(|e| StoreError::Network(format!("save failed: {e}")))?;
        check_status(url, &response)?;

        info!("Saved document: {} ({} subjects)", url, document.len());
        Ok(document)
    }
}
