//! Core abstractions for finagent
//!
//! This crate defines the pieces every other finagent crate agrees on:
//!
//! - [`DataTool`]: the capability an LLM agent can select and invoke at runtime
//! - [`ToolRegistry`]: the static set of tools handed to the agent
//! - [`ChatMessage`]: one entry of a session transcript
//! - [`FetchError`] / [`ToolError`]: typed failures, so callers can tell a
//!   rate limit from a bad argument without inspecting strings

pub mod chat;
pub mod error;
pub mod registry;
pub mod tool;

pub use chat::{ChatMessage, ChatRole};
pub use error::{FetchError, ToolError};
pub use registry::ToolRegistry;
pub use tool::{DataTool, ToolDescriptor};
