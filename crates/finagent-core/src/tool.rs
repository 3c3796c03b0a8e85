//! Data tool capability

use crate::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static description of a tool, as shown to the LLM
///
/// The description is what the model reads to decide whether the tool applies
/// and how to fill its arguments; `parameters` is a JSON Schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// A named, independently invocable data-retrieval capability
///
/// Which tool runs, and in what order, is decided by the model at runtime.
/// Implementations validate their own arguments and fail fast with
/// [`ToolError::InvalidInput`] before touching the network.
#[async_trait]
pub trait DataTool: Send + Sync {
    /// Unique name within a [`crate::ToolRegistry`]
    fn name(&self) -> &'static str;

    /// Natural-language description for the model
    fn description(&self) -> String;

    /// JSON Schema for the arguments
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "stock": { "type": "string", "description": "4-letter symbol, e.g. BBRI" }
    ///     },
    ///     "required": ["stock"]
    /// });
    /// assert_eq!(schema["required"][0], "stock");
    /// ```
    fn parameters(&self) -> Value;

    /// Run the tool with model-supplied arguments
    async fn invoke(&self, args: Value) -> Result<Value, ToolError>;

    fn describe(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description(),
            parameters: self.parameters(),
        }
    }
}
