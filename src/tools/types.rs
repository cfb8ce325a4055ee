use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::core::FunctionCallError;

/// Defines a tool's interface including its name, description, and parameter schema
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    /// Name the model uses in `functionCall.name`
    pub name: String,
    pub description: String,
    /// JSON schema defining the tool's parameters
    pub parameters: Value,
}

/// A function the model may ask the caller to execute.
#[async_trait]
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with the call's `args` object.
    async fn execute(&self, arguments: &Value) -> Result<Value, FunctionCallError>;
}
