//! Completion request and response types

use crate::{Message, ToolDefinition};
use serde::{Deserialize, Serialize};

/// One model round-trip: system prompt, conversation and available tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Provider-specific model identifier
    pub model: String,

    /// Prior turns followed by the current question and any tool results
    pub messages: Vec<Message>,

    /// Agent instructions, sent ahead of the messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Upper bound on generated tokens for this round-trip
    pub max_tokens: usize,

    /// Sampling temperature; 0 means deterministic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Tools the model may call; `None` when the agent has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Response from LLM completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Assistant message, text and/or tool calls
    pub message: Message,

    /// Why generation ended; decides whether tools run next
    pub stop_reason: StopReason,

    pub usage: TokenUsage,
}

/// Reason the LLM stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion (end of turn)
    EndTurn,
    /// Cut off at `max_tokens`
    MaxTokens,
    /// The model wants one or more tools run
    ToolUse,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens, including system prompt and tool schemas
    pub input_tokens: usize,

    /// Tokens generated in the reply
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Prompt plus completion tokens
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

impl CompletionRequest {
    /// Start a request for `model`
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder::new(model)
    }
}

/// Builder for CompletionRequest
pub struct CompletionRequestBuilder {
    model: String,
    messages: Vec<Message>,
    system: Option<String>,
    max_tokens: usize,
    temperature: Option<f32>,
    tools: Option<Vec<ToolDefinition>>,
}

impl CompletionRequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            system: None,
            max_tokens: 1024,
            temperature: None,
            tools: None,
        }
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Append one message after those already set
    pub fn add_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the available tools; an empty list sends none
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = if tools.is_empty() { None } else { Some(tools) };
        self
    }

    pub fn build(self) -> CompletionRequest {
        CompletionRequest {
            model: self.model,
            messages: self.messages,
            system: self.system,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            tools: self.tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let request = CompletionRequest::builder("llama3-groq-70b-8192-tool-use-preview")
            .add_message(Message::user("Hello"))
            .system("You are a financial agent")
            .max_tokens(2048)
            .temperature(0.0)
            .build();

        assert_eq!(request.model, "llama3-groq-70b-8192-tool-use-preview");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, 2048);
        assert_eq!(request.temperature, Some(0.0));
        assert!(request.tools.is_none());
    }

    #[test]
    fn test_empty_tool_list_is_omitted() {
        let request = CompletionRequest::builder("m").tools(vec![]).build();
        assert!(request.tools.is_none());

        let request = CompletionRequest::builder("m")
            .tools(vec![ToolDefinition::new("t", "d", json!({}))])
            .build();
        assert_eq!(request.tools.map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            input_tokens: 100,
            output_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
