//! Agent executor for running agent turns
//!
//! The AgentExecutor implements the tool-calling loop:
//! 1. Call the model with the conversation and the tool descriptors
//! 2. If it asks for tools, run them one after another and append the results
//! 3. Loop until it answers, or until `max_iterations` model calls
//!
//! Precondition failures inside a tool go back to the model as error results
//! so it can fix its arguments. Data-API failures abort the turn.

use crate::{Agent, AgentError, Result};
use async_trait::async_trait;
use finagent_core::{ChatMessage, ToolError, ToolRegistry};
use finagent_llm::{
    CompletionRequest, ContentBlock, LLMProvider, Message, StopReason, ToolDefinition,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Receives intermediate events of a turn
///
/// Used to stream the agent's "thinking" (which tools it calls, and how long
/// they take) to the user while the turn is still running.
#[async_trait]
pub trait ExecutorEventHandler: Send + Sync {
    async fn on_tool_start(&self, _id: &str, _name: &str, _input: &Value) {}

    async fn on_tool_done(
        &self,
        _id: &str,
        _name: &str,
        _result: std::result::Result<&Value, &str>,
        _duration_ms: u64,
    ) {
    }

    async fn on_complete(&self, _answer: &str) {}

    async fn on_error(&self, _error: &str) {}
}

/// No-op event handler for when events are not needed
pub struct NoOpEventHandler;

#[async_trait]
impl ExecutorEventHandler for NoOpEventHandler {}

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on model calls per turn
    pub max_iterations: usize,

    pub model: String,

    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "llama3-groq-70b-8192-tool-use-preview".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: Some(0.0),
        }
    }
}

/// Runs agent turns: model → tool calls → model → ... → answer
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Arc<dyn ExecutorEventHandler>,
}

impl AgentExecutor {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    pub fn builder() -> AgentExecutorBuilder {
        AgentExecutorBuilder::new()
    }

    /// Set the handler that receives intermediate events
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = handler;
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Run one turn over an already-assembled conversation
    pub async fn run_conversation(&self, mut conversation: Vec<Message>) -> Result<String> {
        let tools: Vec<ToolDefinition> = self
            .tool_registry
            .descriptors()
            .into_iter()
            .map(ToolDefinition::from)
            .collect();
        debug!(tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let mut builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .max_tokens(self.config.max_tokens)
                .tools(tools.clone());
            if let Some(system) = &self.config.system_prompt {
                builder = builder.system(system.clone());
            }
            if let Some(temperature) = self.config.temperature {
                builder = builder.temperature(temperature);
            }

            let response = match self.provider.complete(builder.build()).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, provider = self.provider.name(), "LLM request failed");
                    self.event_handler.on_error(&e.to_string()).await;
                    return Err(e.into());
                }
            };

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::ToolUse => {
                    let results = self.execute_tools(&response.message).await?;
                    if results.is_empty() {
                        warn!("ToolUse stop reason without any tool calls");
                    }
                    conversation.extend(results);
                }
                StopReason::EndTurn => {
                    let answer = response.message.text().unwrap_or_default().to_string();
                    info!(iteration, answer_length = answer.len(), "Agent completed");
                    self.event_handler.on_complete(&answer).await;
                    return Ok(answer);
                }
                StopReason::MaxTokens => {
                    warn!("Hit max tokens in LLM response");
                    let answer = match response.message.text() {
                        Some(text) if !text.is_empty() => text.to_string(),
                        _ => "Response truncated due to token limit".to_string(),
                    };
                    self.event_handler.on_complete(&answer).await;
                    return Ok(answer);
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        let err = AgentError::IterationLimit(self.config.max_iterations);
        self.event_handler.on_error(&err.to_string()).await;
        Err(err)
    }

    /// Run the requested tools in order, one at a time
    async fn execute_tools(&self, message: &Message) -> Result<Vec<Message>> {
        let mut results = Vec::new();

        for block in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = block else {
                continue;
            };

            let input_preview: String = input.to_string().chars().take(500).collect();
            info!(tool_name = %name, tool_id = %id, input = %input_preview, "Executing tool");
            self.event_handler.on_tool_start(id, name, input).await;

            let Some(tool) = self.tool_registry.get(name) else {
                warn!(tool_name = %name, "Model requested an unknown tool");
                let err = AgentError::ToolNotFound(name.clone());
                self.event_handler.on_error(&err.to_string()).await;
                return Err(err);
            };

            let started = Instant::now();
            let outcome = tool.invoke(input.clone()).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(value) => {
                    let text = value.to_string();
                    let preview: String = text.chars().take(500).collect();
                    info!(
                        tool_name = %name,
                        duration_ms,
                        result_length = text.len(),
                        "Tool execution succeeded"
                    );
                    debug!(tool_name = %name, result_preview = %preview, "Tool result");
                    self.event_handler
                        .on_tool_done(id, name, Ok(&value), duration_ms)
                        .await;
                    results.push(Message::tool_result(id.clone(), text));
                }
                Err(ToolError::Fetch(fetch)) => {
                    warn!(tool_name = %name, duration_ms, error = %fetch, "Data request failed, aborting turn");
                    let message = fetch.to_string();
                    self.event_handler
                        .on_tool_done(id, name, Err(&message), duration_ms)
                        .await;
                    self.event_handler.on_error(&message).await;
                    return Err(AgentError::Fetch(fetch));
                }
                Err(err @ ToolError::InvalidInput(_)) => {
                    warn!(tool_name = %name, duration_ms, error = %err, "Tool rejected its input");
                    let message = err.to_string();
                    self.event_handler
                        .on_tool_done(id, name, Err(&message), duration_ms)
                        .await;
                    results.push(Message::tool_error(id.clone(), format!("Error: {message}")));
                }
            }
        }

        Ok(results)
    }
}

#[async_trait]
impl Agent for AgentExecutor {
    async fn respond(&self, input: &str, history: &[ChatMessage]) -> Result<String> {
        let mut conversation: Vec<Message> = history.iter().map(Message::from).collect();
        conversation.push(Message::user(input));
        self.run_conversation(conversation).await
    }

    fn name(&self) -> &str {
        "financial-agent"
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_handler: Option<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutorBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tool_registry: Arc::new(ToolRegistry::new()),
            config: ExecutorConfig::default(),
            event_handler: None,
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = registry;
        self
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Configuration("Provider not set".to_string()))?;
        if self.config.max_iterations == 0 {
            return Err(AgentError::Configuration(
                "max_iterations must be greater than 0".to_string(),
            ));
        }

        let executor = AgentExecutor::new(provider, self.tool_registry, self.config);
        Ok(match self.event_handler {
            Some(handler) => executor.with_event_handler(handler),
            None => executor,
        })
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finagent_core::{DataTool, FetchError};
    use finagent_llm::{CompletionResponse, LLMError, MessageContent, TokenUsage};
    use mockall::{Sequence, mock};
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    mock! {
        Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> finagent_llm::Result<CompletionResponse>;
            fn name(&self) -> &str;
        }
    }

    /// Tool that returns a canned outcome and counts calls
    struct Canned {
        outcome: std::result::Result<Value, ToolError>,
        calls: AtomicUsize,
    }

    impl Canned {
        fn ok(value: Value) -> Arc<Self> {
            Arc::new(Self {
                outcome: Ok(value),
                calls: AtomicUsize::new(0),
            })
        }

        fn err(err: ToolError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl DataTool for Canned {
        fn name(&self) -> &'static str {
            "get_daily_tx"
        }

        fn description(&self) -> String {
            "daily".to_string()
        }

        fn parameters(&self) -> Value {
            json!({ "type": "object" })
        }

        async fn invoke(&self, _args: Value) -> std::result::Result<Value, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ExecutorEventHandler for Recorder {
        async fn on_tool_start(&self, _id: &str, name: &str, _input: &Value) {
            self.events.lock().unwrap().push(format!("start:{name}"));
        }

        async fn on_tool_done(
            &self,
            _id: &str,
            name: &str,
            result: std::result::Result<&Value, &str>,
            _duration_ms: u64,
        ) {
            let status = if result.is_ok() { "ok" } else { "err" };
            self.events.lock().unwrap().push(format!("done:{name}:{status}"));
        }

        async fn on_complete(&self, answer: &str) {
            self.events.lock().unwrap().push(format!("complete:{answer}"));
        }

        async fn on_error(&self, _error: &str) {
            self.events.lock().unwrap().push("error".to_string());
        }
    }

    fn tool_call(id: &str, name: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::tool_uses_from(vec![ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input: json!({ "stock": "BBRI" }),
            }]),
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    fn answer(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn executor(provider: MockProvider, tool: Arc<Canned>) -> AgentExecutor {
        let registry = ToolRegistry::new().with(tool);
        AgentExecutor::builder()
            .provider(Arc::new(provider))
            .tool_registry(Arc::new(registry))
            .system_prompt("Today date is 2024-06-03")
            .build()
            .unwrap()
    }

    fn last_tool_result(request: &CompletionRequest) -> Option<(String, Option<bool>)> {
        match request.messages.last()?.content.as_ref()? {
            MessageContent::Blocks(blocks) => blocks.iter().find_map(|b| match b {
                ContentBlock::ToolResult {
                    content, is_error, ..
                } => Some((content.clone(), *is_error)),
                _ => None,
            }),
            MessageContent::Text(_) => None,
        }
    }

    #[test]
    fn test_builder() {
        let builder = AgentExecutorBuilder::new()
            .model("test-model")
            .max_iterations(5)
            .system_prompt("Test prompt");

        assert_eq!(builder.config.model, "test-model");
        assert_eq!(builder.config.max_iterations, 5);
        assert_eq!(builder.config.system_prompt.as_deref(), Some("Test prompt"));
    }

    #[test]
    fn test_default_config_is_deterministic() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.temperature, Some(0.0));
        assert_eq!(config.model, "llama3-groq-70b-8192-tool-use-preview");
    }

    #[test]
    fn test_build_without_provider_fails() {
        let result = AgentExecutorBuilder::new().build();
        assert!(matches!(result, Err(AgentError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_tool_result_is_fed_back_to_model() {
        let mut provider = MockProvider::new();
        let mut seq = Sequence::new();
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| {
                req.system.as_deref() == Some("Today date is 2024-06-03")
                    && req.temperature == Some(0.0)
                    && req.tools.as_ref().map(Vec::len) == Some(1)
            })
            .returning(|_| Ok(tool_call("call_1", "get_daily_tx")));
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| {
                last_tool_result(req) == Some((r#"{"close":4500}"#.to_string(), None))
            })
            .returning(|_| Ok(answer("BBRI closed at 4,500")));
        provider.expect_name().return_const("mock".to_string());

        let tool = Canned::ok(json!({ "close": 4500 }));
        let agent = executor(provider, tool.clone());

        let out = agent.respond("How did BBRI close?", &[]).await.unwrap();
        assert_eq!(out, "BBRI closed at 4,500");
        assert_eq!(tool.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_goes_back_to_model() {
        let mut provider = MockProvider::new();
        let mut seq = Sequence::new();
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(tool_call("call_1", "get_daily_tx")));
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|req| {
                last_tool_result(req)
                    == Some(("Error: symbol must be 4 characters".to_string(), Some(true)))
            })
            .returning(|_| Ok(answer("Please give a 4-letter symbol")));
        provider.expect_name().return_const("mock".to_string());

        let tool = Canned::err(ToolError::invalid("symbol must be 4 characters"));
        let agent = executor(provider, tool);

        let out = agent.respond("report for BR", &[]).await.unwrap();
        assert_eq!(out, "Please give a 4-letter symbol");
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_turn() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(tool_call("call_1", "get_daily_tx")));
        provider.expect_name().return_const("mock".to_string());

        let tool = Canned::err(FetchError::from_status(429, "quota").into());
        let recorder = Arc::new(Recorder::default());
        let agent = executor(provider, tool).with_event_handler(recorder.clone());

        let err = agent.respond("BBRI?", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            AgentError::Fetch(FetchError::RateLimited { .. })
        ));
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["start:get_daily_tx", "done:get_daily_tx:err", "error"]
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Ok(tool_call("call_1", "get_weather")));
        provider.expect_name().return_const("mock".to_string());

        let agent = executor(provider, Canned::ok(json!({})));
        let err = agent.respond("weather?", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "get_weather"));
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(3)
            .returning(|_| Ok(tool_call("call", "get_daily_tx")));
        provider.expect_name().return_const("mock".to_string());

        let tool = Canned::ok(json!([]));
        let registry = ToolRegistry::new().with(tool.clone());
        let agent = AgentExecutor::builder()
            .provider(Arc::new(provider))
            .tool_registry(Arc::new(registry))
            .max_iterations(3)
            .build()
            .unwrap();

        let err = agent.respond("loop", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::IterationLimit(3)));
        assert_eq!(tool.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_history_precedes_input() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .withf(|req| {
                req.messages.len() == 3
                    && req.messages[0].text() == Some("first question")
                    && req.messages[1].text() == Some("first answer")
                    && req.messages[2].text() == Some("follow-up")
            })
            .returning(|_| Ok(answer("ok")));
        provider.expect_name().return_const("mock".to_string());

        let agent = executor(provider, Canned::ok(json!({})));
        let history = vec![
            ChatMessage::user("first question"),
            ChatMessage::assistant("first answer"),
        ];
        assert_eq!(agent.respond("follow-up", &history).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_llm_error_propagates() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_| Err(LLMError::RateLimitExceeded("slow down".to_string())));
        provider.expect_name().return_const("mock".to_string());

        let agent = executor(provider, Canned::ok(json!({})));
        let err = agent.respond("hi", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(LLMError::RateLimitExceeded(_))));
    }

    #[tokio::test]
    async fn test_events_for_successful_turn() {
        let mut provider = MockProvider::new();
        let mut seq = Sequence::new();
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(tool_call("call_1", "get_daily_tx")));
        provider
            .expect_complete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(answer("done")));
        provider.expect_name().return_const("mock".to_string());

        let recorder = Arc::new(Recorder::default());
        let agent =
            executor(provider, Canned::ok(json!([]))).with_event_handler(recorder.clone());
        agent.respond("q", &[]).await.unwrap();

        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["start:get_daily_tx", "done:get_daily_tx:ok", "complete:done"]
        );
    }
}
