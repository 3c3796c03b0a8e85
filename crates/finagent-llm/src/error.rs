//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LLMError {
    /// Non-success status not covered by a more specific variant
    #[error("HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found (HTTP 404)
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Transport-level failure
    #[cfg(feature = "groq")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LLMError {
    /// HTTP status behind the error, where the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::AuthenticationFailed => Some(401),
            Self::RateLimitExceeded(_) => Some(429),
            Self::InvalidRequest(_) => Some(400),
            Self::ModelNotFound(_) => Some(404),
            _ => None,
        }
    }

    /// Whether the request failed before any response arrived
    pub fn is_transport(&self) -> bool {
        #[cfg(feature = "groq")]
        if let Self::HttpError(e) = self {
            return e.status().is_none();
        }
        false
    }
}
