use log::debug;
use serde_json::Value;
use std::collections::HashMap;

use crate::core::FunctionCallError;
use crate::gemini::FunctionCallPayload;

use super::types::{Tool, ToolDefinition};

/// Tools keyed by the `functionCall.name` the model uses for them.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tool` under its definition's name, replacing any tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.definition().name;
        if self.tools.insert(name.clone(), Box::new(tool)).is_some() {
            debug!("[Tools] replaced tool {name}");
        }
    }

    /// Definitions of every registered tool, ordered by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Runs the tool named by `call` with the call's arguments.
    pub async fn execute(&self, call: &FunctionCallPayload) -> Result<Value, FunctionCallError> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| FunctionCallError::ToolNotFound(call.name.clone()))?;
        tool.execute(&call.arguments()).await
    }
}
