//! Configuration for the sectors.app data API

use crate::error::{Result, SectorsError};
use finagent_utils::ApiKey;
use url::Url;

/// Default base URL of the data API
pub const DEFAULT_BASE_URL: &str = "https://api.sectors.app/v1/";

/// Credentials and endpoint of the data API
#[derive(Debug, Clone)]
pub struct SectorsConfig {
    /// Sent verbatim in the `Authorization` header
    pub api_key: ApiKey,

    /// Endpoint paths are appended to this URL
    pub base_url: Url,
}

impl SectorsConfig {
    /// Create a config with the default base URL
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SectorsError::ConfigError(
                "Sectors API key is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            base_url: Url::parse(DEFAULT_BASE_URL)?,
        })
    }

    /// Override the base URL, e.g. for a proxy or a local stub server
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(SectorsError::ConfigError(format!(
                "base URL must be an http(s) URL, got {base_url}"
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Load from `SECTORS_API_KEY` and, if set, `SECTORS_API_BASE`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SECTORS_API_KEY").map_err(|_| {
            SectorsError::ConfigError("SECTORS_API_KEY environment variable not set".to_string())
        })?;

        let config = Self::new(api_key)?;
        match std::env::var("SECTORS_API_BASE") {
            Ok(base) => config.with_base_url(&base),
            Err(_) => Ok(config),
        }
    }
}
