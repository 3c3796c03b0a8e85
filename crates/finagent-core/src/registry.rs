//! Static registry of data tools

use crate::{DataTool, ToolDescriptor};
use std::sync::Arc;

/// The fixed set of tools an agent may choose from
///
/// Built once at start-up and shared read-only afterwards. Tools keep their
/// registration order so the descriptor list sent to the model is stable.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn DataTool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any earlier tool with the same name
    pub fn register(&mut self, tool: Arc<dyn DataTool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(pos) => self.tools[pos] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, tool: Arc<dyn DataTool>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn DataTool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Descriptors of every tool, in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.describe()).collect()
    }

    /// Names of every tool, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
