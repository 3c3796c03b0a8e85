//! Concrete LLM provider implementations

#[cfg(feature = "groq")]
pub mod groq;

#[cfg(feature = "groq")]
pub use groq::{GroqConfig, GroqProvider};
