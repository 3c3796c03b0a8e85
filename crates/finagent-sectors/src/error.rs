//! Error types for assembling the sectors.app tools and agent

use finagent_llm::LLMError;
use thiserror::Error;

/// Set-up failures; per-request failures are [`finagent_core::FetchError`]
#[derive(Debug, Error)]
pub enum SectorsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),

    #[error(transparent)]
    Llm(#[from] LLMError),
}

/// Result type alias for sectors set-up
pub type Result<T> = std::result::Result<T, SectorsError>;
