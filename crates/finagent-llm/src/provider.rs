//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for LLM providers
///
/// One call is one model round-trip: the request carries the system prompt,
/// the conversation so far and the tool definitions; the response is either a
/// final answer or a set of tool-use requests.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name for logs (e.g. "groq")
    fn name(&self) -> &str;
}
