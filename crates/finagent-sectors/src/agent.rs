//! Financial agent assembly
//!
//! Wires the data tools, the system prompt and a chat model into an
//! [`AgentExecutor`]. Credentials are passed in explicitly.

use crate::client::SectorsApi;
use crate::config::SectorsConfig;
use crate::error::Result;
use crate::prompts;
use crate::tools::sectors_tools;
use chrono::NaiveDate;
use finagent_llm::LLMProvider;
use finagent_llm::providers::{GroqConfig, GroqProvider};
use finagent_runtime::{AgentExecutorBuilder, ExecutorConfig};
use std::sync::Arc;
use tracing::info;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "llama3-groq-70b-8192-tool-use-preview";

/// Tunables of the assembled agent
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    /// Interpolated into the system prompt
    pub today: NaiveDate,
    pub max_iterations: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            today: prompts::today(),
            max_iterations: ExecutorConfig::default().max_iterations,
        }
    }
}

/// Executor builder for the financial agent over the given API and model
///
/// Sampling is deterministic (temperature 0). Callers add an event handler
/// and call `build()`.
pub fn financial_agent(
    api: &SectorsApi,
    provider: Arc<dyn LLMProvider>,
    settings: &AgentSettings,
) -> Result<AgentExecutorBuilder> {
    let registry = sectors_tools(api);
    let system_prompt = prompts::system_prompt(settings.today)?;

    info!(
        model = %settings.model,
        tools = registry.len(),
        today = %settings.today,
        "Assembling financial agent"
    );

    Ok(AgentExecutorBuilder::new()
        .provider(provider)
        .tool_registry(Arc::new(registry))
        .model(settings.model.clone())
        .system_prompt(system_prompt)
        .temperature(0.0)
        .max_iterations(settings.max_iterations))
}

/// [`financial_agent`] over HTTP: sectors.app for data, Groq for the model
pub fn connect(
    sectors: &SectorsConfig,
    groq: GroqConfig,
    settings: &AgentSettings,
) -> Result<AgentExecutorBuilder> {
    let api = SectorsApi::from_config(sectors)?;
    let provider = GroqProvider::with_config(groq)?;
    financial_agent(&api, Arc::new(provider), settings)
}
