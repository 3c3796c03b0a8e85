//! Terminal front-end for the finagent financial agent
//!
//! - [`config`]: clap arguments and interactive credential entry
//! - [`session`]: the chat transcript and turn dispatch
//! - [`notice`]: what the user sees when a turn fails
//! - [`events`]: the "thinking" stream of tool calls
//! - [`repl`]: prompt-line handling

pub mod config;
pub mod events;
pub mod notice;
pub mod repl;
pub mod session;

pub use config::{Args, Settings};
pub use events::ThinkingPrinter;
pub use notice::Notice;
pub use session::{ChatSession, SessionState};
