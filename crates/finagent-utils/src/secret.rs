//! Redacted credential type

use std::fmt;

/// An API key that never shows up in logs or debug output
///
/// The raw value is only reachable through [`ApiKey::expose`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key, trimming surrounding whitespace
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self(raw.trim().to_string())
    }

    /// The raw key, for attaching to an outbound request
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for ApiKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for ApiKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
