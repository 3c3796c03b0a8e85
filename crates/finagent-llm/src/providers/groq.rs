//! Groq provider implementation
//!
//! Groq serves an OpenAI-compatible chat completions API with function
//! calling. See: https://console.groq.com/docs/tool-use
//!
//! # Example
//!
//! ```no_run
//! use finagent_llm::{CompletionRequest, LLMProvider, Message};
//! use finagent_llm::providers::{GroqConfig, GroqProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GroqProvider::with_config(GroqConfig::new("gsk_..."))?;
//!
//!     let request = CompletionRequest::builder("llama3-groq-70b-8192-tool-use-preview")
//!         .add_message(Message::user("Hello!"))
//!         .temperature(0.0)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition,
};
use async_trait::async_trait;
use finagent_utils::ApiKey;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Configuration for the Groq provider
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub api_key: ApiKey,

    /// Base URL (default: "https://api.groq.com/openai/v1")
    pub api_base: String,

    /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>,
}

impl GroqConfig {
    /// Create a config with the given API key and default settings
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GROQ_API_BASE.to_string(),
            timeout_secs: None,
        }
    }

    /// Override the base URL, e.g. for a proxy
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}

/// Groq chat completions provider
pub struct GroqProvider {
    client: Client,
    config: GroqConfig,
}

impl GroqProvider {
    pub fn with_config(config: GroqConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LLMError::ConfigurationError(
                "Groq API key is empty".to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self> {
        Self::with_config(GroqConfig::new(api_key))
    }

    pub fn config(&self) -> &GroqConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for GroqProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let groq_request = GroqRequest {
            model: request.model.clone(),
            messages: build_groq_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: request.tools.as_deref().map(convert_tools),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(self.config.api_key.expose())
            .json(&groq_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model),
                code => LLMError::RequestFailed {
                    status: code,
                    body: error_text,
                },
            });
        }

        let groq_response: GroqResponse = response
            .json()
            .await
            .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        let choice = groq_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

        let usage = groq_response.usage.unwrap_or_default();
        debug!(
            finish_reason = %choice.finish_reason,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Received response"
        );

        let message = parse_groq_response(choice.message)?;
        let stop_reason = map_stop_reason(&choice.finish_reason, &message);

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest {
    model: String,
    messages: Vec<GroqMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GroqTool>>,
}

#[derive(Debug, Serialize)]
struct GroqMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<GroqToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl GroqMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct GroqTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: GroqFunction,
}

#[derive(Debug, Serialize)]
struct GroqFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct GroqToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    tool_type: String,
    function: GroqFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct GroqFunctionCall {
    name: String,
    /// JSON-encoded arguments
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    #[serde(default)]
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<GroqToolCall>>,
}

#[derive(Debug, Default, Deserialize)]
struct GroqUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// System prompt first, then the conversation
fn build_groq_messages(system: Option<String>, messages: Vec<Message>) -> Vec<GroqMessage> {
    let mut result = Vec::with_capacity(messages.len() + 1);

    if let Some(sys) = system {
        result.push(GroqMessage::text("system", sys));
    }

    for msg in messages {
        result.extend(convert_message(msg));
    }

    result
}

/// Convert one message; tool results expand into separate `tool` messages
fn convert_message(msg: Message) -> Vec<GroqMessage> {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    };

    match msg.content {
        Some(MessageContent::Text(text)) => vec![GroqMessage::text(role, text)],
        Some(MessageContent::Blocks(blocks)) => convert_blocks(role, blocks),
        None => vec![GroqMessage::text(role, String::new())],
    }
}

fn convert_blocks(role: &'static str, blocks: Vec<ContentBlock>) -> Vec<GroqMessage> {
    let mut messages = Vec::new();
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(GroqToolCall {
                    id,
                    tool_type: function_type(),
                    function: GroqFunctionCall {
                        name,
                        arguments: input.to_string(),
                    },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => {
                messages.push(GroqMessage {
                    role: "tool",
                    content: Some(content),
                    tool_calls: None,
                    tool_call_id: Some(tool_use_id),
                });
            }
        }
    }

    if !texts.is_empty() || !tool_calls.is_empty() {
        messages.insert(
            0,
            GroqMessage {
                role,
                content: (!texts.is_empty()).then(|| texts.join("\n")),
                tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                tool_call_id: None,
            },
        );
    }

    messages
}

fn convert_tools(tools: &[ToolDefinition]) -> Vec<GroqTool> {
    tools
        .iter()
        .map(|tool| GroqTool {
            tool_type: "function",
            function: GroqFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

fn parse_groq_response(msg: GroqResponseMessage) -> Result<Message> {
    let mut blocks = Vec::new();

    if let Some(content) = msg.content.filter(|c| !c.is_empty()) {
        blocks.push(ContentBlock::Text { text: content });
    }

    for call in msg.tool_calls.unwrap_or_default() {
        let input: serde_json::Value = if call.function.arguments.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                LLMError::UnexpectedResponse(format!("Failed to parse tool arguments: {e}"))
            })?
        };

        blocks.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
    }

    if blocks.is_empty() {
        blocks.push(ContentBlock::Text {
            text: String::new(),
        });
    }

    Ok(Message {
        role: Role::Assistant,
        content: Some(MessageContent::Blocks(blocks)),
    })
}

/// Map the finish reason; tool calls win even if the reason string disagrees
fn map_stop_reason(reason: &str, message: &Message) -> StopReason {
    if message.has_tool_uses() {
        return StopReason::ToolUse;
    }
    match reason {
        "length" => StopReason::MaxTokens,
        "tool_calls" => StopReason::ToolUse,
        "stop" => StopReason::EndTurn,
        other => {
            debug!("Unknown finish reason: {}", other);
            StopReason::EndTurn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = GroqProvider::new("gsk-test").unwrap();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.config().api_key.expose(), "gsk-test");
        assert_eq!(provider.config().api_base, "https://api.groq.com/openai/v1");
        assert_eq!(provider.config().timeout_secs, None);
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let result = GroqProvider::new("  ");
        assert!(matches!(result, Err(LLMError::ConfigurationError(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = GroqConfig::new("k")
            .with_api_base("http://localhost:8080/v1/")
            .with_timeout(30);
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(format!("{:?}", config.api_key), "ApiKey(***)");
    }

    #[test]
    fn test_system_prompt_goes_first() {
        let messages = build_groq_messages(
            Some("Today date is 2024-06-03".to_string()),
            vec![Message::user("Hi")],
        );

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_assistant_tool_call_round_trip() {
        let msg = Message::tool_uses_from(vec![ContentBlock::ToolUse {
            id: "call_1".to_string(),
            name: "get_daily_tx".to_string(),
            input: json!({ "stock": "BBRI" }),
        }]);

        let converted = convert_message(msg);
        assert_eq!(converted.len(), 1);
        assert_eq!(converted[0].role, "assistant");
        assert!(converted[0].content.is_none());
        let calls = converted[0].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "get_daily_tx");
        assert_eq!(calls[0].function.arguments, r#"{"stock":"BBRI"}"#);
    }

    #[test]
    fn test_tool_results_become_tool_messages() {
        let msg = Message {
            role: Role::User,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::ToolResult {
                    tool_use_id: "call_1".to_string(),
                    content: "[]".to_string(),
                    is_error: None,
                },
                ContentBlock::ToolResult {
                    tool_use_id: "call_2".to_string(),
                    content: "Error: bad".to_string(),
                    is_error: Some(true),
                },
            ])),
        };

        let converted = convert_message(msg);
        assert_eq!(converted.len(), 2);
        assert!(converted.iter().all(|m| m.role == "tool"));
        assert_eq!(converted[1].tool_call_id.as_deref(), Some("call_2"));
    }

    #[test]
    fn test_tool_definition_conversion() {
        let tools = convert_tools(&[ToolDefinition::new(
            "get_company_report",
            "Company report",
            json!({ "type": "object" }),
        )]);
        assert_eq!(tools[0].tool_type, "function");
        assert_eq!(tools[0].function.name, "get_company_report");
    }

    #[test]
    fn test_parse_response_with_tool_calls() {
        let raw = json!({
            "content": null,
            "tool_calls": [{
                "id": "call_9",
                "type": "function",
                "function": {
                    "name": "get_top_companies_by_tx_volume",
                    "arguments": "{\"start_date\":\"2024-06-03\",\"end_date\":\"2024-06-03\"}"
                }
            }]
        });
        let msg: GroqResponseMessage = serde_json::from_value(raw).unwrap();
        let message = parse_groq_response(msg).unwrap();

        let uses = message.tool_uses();
        assert_eq!(uses.len(), 1);
        match uses[0] {
            ContentBlock::ToolUse { id, input, .. } => {
                assert_eq!(id, "call_9");
                assert_eq!(input["start_date"], "2024-06-03");
            }
            _ => panic!("Expected tool use"),
        }
        assert_eq!(map_stop_reason("tool_calls", &message), StopReason::ToolUse);
    }

    #[test]
    fn test_malformed_arguments_are_an_error() {
        let msg = GroqResponseMessage {
            content: None,
            tool_calls: Some(vec![GroqToolCall {
                id: "c".to_string(),
                tool_type: function_type(),
                function: GroqFunctionCall {
                    name: "x".to_string(),
                    arguments: "{not json".to_string(),
                },
            }]),
        };
        assert!(matches!(
            parse_groq_response(msg),
            Err(LLMError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_stop_reason_mapping() {
        let text = Message::assistant("done");
        assert_eq!(map_stop_reason("stop", &text), StopReason::EndTurn);
        assert_eq!(map_stop_reason("length", &text), StopReason::MaxTokens);
        assert_eq!(map_stop_reason("weird", &text), StopReason::EndTurn);
    }
}
