//! LLM provider abstraction layer for finagent
//!
//! This crate provides provider-agnostic types for talking to a chat model
//! that can call tools:
//!
//! - Message types, including tool-use requests and tool results
//! - Completion request/response types
//! - Tool definitions and a small JSON Schema helper module
//! - The [`LLMProvider`] trait
//! - The Groq provider (OpenAI-compatible chat completions), behind the
//!   `groq` feature

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;

#[cfg(feature = "groq")]
pub mod providers;
