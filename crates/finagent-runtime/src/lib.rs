//! Agent runtime for finagent
//!
//! [`AgentExecutor`] runs one agent turn: it sends the conversation and the
//! tool descriptors to the model, runs whatever tools the model asks for,
//! feeds the results back and repeats until the model answers.

pub mod agent;
pub mod executor;

pub use agent::{Agent, AgentError, Result};
pub use executor::{
    AgentExecutor, AgentExecutorBuilder, ExecutorConfig, ExecutorEventHandler, NoOpEventHandler,
};
