//! Fetch helper for the sectors.app API
//!
//! [`Retriever`] is the transport seam: one authenticated GET, parsed as
//! JSON, with every non-success status turned into a typed [`FetchError`].
//! Nothing is retried or cached.

use crate::config::SectorsConfig;
use crate::endpoints::Endpoint;
use crate::error::Result;
use async_trait::async_trait;
use finagent_core::FetchError;
use finagent_utils::ApiKey;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use url::Url;

/// Performs one GET request and returns the JSON body
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, url: Url) -> std::result::Result<Value, FetchError>;
}

/// [`Retriever`] over reqwest, sending the key as the raw `Authorization` header
pub struct HttpRetriever {
    client: Client,
    api_key: ApiKey,
}

impl HttpRetriever {
    pub fn new(api_key: ApiKey) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    #[instrument(skip(self, url), fields(url = %url))]
    async fn retrieve(&self, url: Url) -> std::result::Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.api_key.expose())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // A cut-off error body still reports the status
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Data API request failed");
            return Err(FetchError::from_status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!(body_length = body.len(), "Data API response received");
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// Typed access to the data API endpoints
#[derive(Clone)]
pub struct SectorsApi {
    retriever: Arc<dyn Retriever>,
    base_url: Url,
}

impl SectorsApi {
    pub fn new(retriever: Arc<dyn Retriever>, base_url: Url) -> Self {
        Self {
            retriever,
            base_url,
        }
    }

    /// API over HTTP with the configured key and base URL
    pub fn from_config(config: &SectorsConfig) -> Result<Self> {
        let retriever = HttpRetriever::new(config.api_key.clone())?;
        Ok(Self::new(Arc::new(retriever), config.base_url.clone()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get(&self, endpoint: &Endpoint) -> std::result::Result<Value, FetchError> {
        let url = endpoint.url(&self.base_url);
        debug!(%url, "Fetching");
        self.retriever.retrieve(url).await
    }
}

impl std::fmt::Debug for SectorsApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectorsApi")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
