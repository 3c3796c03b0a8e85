//! Agent trait and turn-level errors

use async_trait::async_trait;
use finagent_core::{ChatMessage, FetchError};
use finagent_llm::LLMError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgentError>;

/// Why an agent turn produced no answer
#[derive(Error, Debug)]
pub enum AgentError {
    /// A data-API request failed; fatal to the turn
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The model call failed
    #[error(transparent)]
    Llm(#[from] LLMError),

    /// The model asked for a tool that is not registered
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The model kept calling tools without answering
    #[error("No final answer after {0} iterations")]
    IterationLimit(usize),

    #[error("Agent configuration error: {0}")]
    Configuration(String),
}

/// Something that turns a user input plus transcript into an answer
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run one turn
    ///
    /// `history` is the transcript before `input`; it is not modified.
    async fn respond(&self, input: &str, history: &[ChatMessage]) -> Result<String>;

    fn name(&self) -> &str;
}
