//! IDX company data for the finagent financial agent
//!
//! This crate talks to the sectors.app v1 API and exposes it to an LLM agent:
//!
//! - [`SectorsApi`]: the fetch helper, one authenticated GET per call over a
//!   pluggable [`Retriever`]
//! - [`Endpoint`]: the path and query template of each API resource
//! - [`aggregate_by_volume`]: folds a multi-day most-traded payload into one
//!   ranking by total volume
//! - [`tools`]: the six data tools handed to the agent
//! - [`financial_agent`] / [`connect`]: system prompt, tools and model wired
//!   into an executor
//!
//! # Example
//!
//! ```rust,no_run
//! use finagent_llm::providers::GroqConfig;
//! use finagent_runtime::Agent;
//! use finagent_sectors::{AgentSettings, SectorsConfig, connect};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sectors = SectorsConfig::from_env()?;
//!     let groq = GroqConfig::new(std::env::var("GROQ_API_KEY")?);
//!
//!     let agent = connect(&sectors, groq, &AgentSettings::default())?.build()?;
//!     let answer = agent
//!         .respond("What are the top 3 most traded stocks yesterday?", &[])
//!         .await?;
//!     println!("{answer}");
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod aggregate;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod prompts;
pub mod tools;

pub use agent::{AgentSettings, DEFAULT_MODEL, connect, financial_agent};
pub use aggregate::aggregate_by_volume;
pub use client::{HttpRetriever, Retriever, SectorsApi};
pub use config::SectorsConfig;
pub use endpoints::Endpoint;
pub use error::{Result, SectorsError};
pub use models::{AggregatedSymbol, KNOWN_SUBSECTORS, Section, TradeRecord, TradesByDate};
pub use tools::sectors_tools;
