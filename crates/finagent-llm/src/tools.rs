//! Tool definition types for LLM tool use

use finagent_core::ToolDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tool definition sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Must match the tool's name in the registry
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's input
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

impl From<ToolDescriptor> for ToolDefinition {
    fn from(d: ToolDescriptor) -> Self {
        Self::new(d.name, d.description, d.parameters)
    }
}

/// Helpers to build JSON schemas for tool parameters
pub mod schema {
    use serde_json::{Value, json};

    /// Object schema with properties
    ///
    /// # Example
    ///
    /// ```
    /// use finagent_llm::tools::schema;
    /// use serde_json::json;
    ///
    /// let schema = schema::object(
    ///     json!({
    ///         "stock": schema::string("4-letter stock symbol"),
    ///         "top_n": schema::integer("How many companies"),
    ///     }),
    ///     &["stock"],
    /// );
    /// assert_eq!(schema["required"], json!(["stock"]));
    /// ```
    pub fn object(properties: Value, required: &[&str]) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// String restricted to a fixed set of values
    pub fn string_enum(description: &str, values: &[&str]) -> Value {
        json!({
            "type": "string",
            "description": description,
            "enum": values,
        })
    }

    pub fn integer(description: &str) -> Value {
        json!({
            "type": "integer",
            "description": description,
        })
    }

    /// Date string in `YYYY-MM-DD` form
    pub fn date(description: &str) -> Value {
        json!({
            "type": "string",
            "format": "date",
            "description": description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_descriptor() {
        let descriptor = ToolDescriptor {
            name: "get_daily_tx".to_string(),
            description: "Daily prices".to_string(),
            parameters: schema::object(json!({ "stock": schema::string("symbol") }), &["stock"]),
        };

        let tool = ToolDefinition::from(descriptor.clone());
        assert_eq!(tool.name, "get_daily_tx");
        assert_eq!(tool.input_schema, descriptor.parameters);
    }

    #[test]
    fn test_schema_builders() {
        let s = schema::string_enum("section", &["overview", "peers"]);
        assert_eq!(s["enum"], json!(["overview", "peers"]));

        assert_eq!(schema::integer("n")["type"], "integer");
        assert_eq!(schema::date("start")["format"], "date");
    }
}
