//! Error types for finagent-core

use thiserror::Error;

/// Failure of a single outbound data-API request
///
/// This is the explicit result type of the fetch helper: nothing here is
/// retried, and every variant is fatal to the agent turn that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 429 from the data API
    #[error("429 Too Many Requests: {body}")]
    RateLimited { body: String },

    /// Any other non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (DNS, connect, TLS, reset...)
    #[error("{0}")]
    Network(String),

    /// A success response whose body was not valid JSON
    #[error("invalid JSON in response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Build the error for a non-success status, singling out 429
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if status == 429 {
            Self::RateLimited { body }
        } else {
            Self::Status { status, body }
        }
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::Status { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// Failure of a single tool invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The arguments violated a precondition; no request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// The data API call failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ToolError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the failure must abort the whole agent turn
    ///
    /// Precondition violations are reported back to the model so it can
    /// correct its arguments; fetch failures surface to the user.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
