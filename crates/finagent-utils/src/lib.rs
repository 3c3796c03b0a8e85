//! Shared utilities for finagent
//!
//! Tracing setup and the redacted [`ApiKey`] type used for every credential
//! the workspace handles.

pub mod logging;
pub mod secret;

pub use logging::init_tracing;
pub use secret::ApiKey;
