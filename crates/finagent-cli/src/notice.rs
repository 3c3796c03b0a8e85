//! User-facing messages for failed turns

use finagent_core::FetchError;
use finagent_llm::LLMError;
use finagent_runtime::AgentError;
use std::fmt;

/// How a failed turn is explained to the user
///
/// None of these end the session; the user may simply retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Rate limited by the data API or the model provider
    UsageLimit,
    /// Any other HTTP status error
    HttpFailure(String),
    /// No response at all
    Connectivity(String),
    Unexpected(String),
}

impl From<&AgentError> for Notice {
    fn from(err: &AgentError) -> Self {
        match err {
            AgentError::Fetch(fetch) => match fetch {
                FetchError::RateLimited { .. } => Notice::UsageLimit,
                FetchError::Status { .. } => Notice::HttpFailure(fetch.to_string()),
                FetchError::Network(_) => Notice::Connectivity(fetch.to_string()),
                FetchError::Decode(_) => Notice::Unexpected(fetch.to_string()),
            },
            AgentError::Llm(LLMError::RateLimitExceeded(_)) => Notice::UsageLimit,
            AgentError::Llm(llm) if llm.status().is_some() => Notice::HttpFailure(llm.to_string()),
            AgentError::Llm(llm) if llm.is_transport() => Notice::Connectivity(llm.to_string()),
            other => Notice::Unexpected(other.to_string()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UsageLimit => f.write_str(
                "We've reached our API usage limit. Please wait a few minutes and try again.",
            ),
            Notice::HttpFailure(e) => {
                write!(f, "Oops! Something went wrong: {e}. Please try again later.")
            }
            Notice::Connectivity(e) => write!(
                f,
                "Network issue detected: {e}. Please check your connection or try again later."
            ),
            Notice::Unexpected(e) => write!(
                f,
                "Unexpected error: {e}. Please try again or contact support if the issue persists."
            ),
        }
    }
}
