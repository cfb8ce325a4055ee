use async_trait::async_trait;
use serde_json::{json, Value};

use crate::core::FunctionCallError;
use crate::tools::types::{Tool, ToolDefinition};

/// Returns its arguments unchanged. Useful for replaying recorded responses.
#[derive(Debug, Default)]
pub struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "echo".to_string(),
            description: "Returns the arguments it was called with.".to_string(),
            parameters: json!({ "type": "object" }),
        }
    }

    async fn execute(&self, arguments: &Value) -> Result<Value, FunctionCallError> {
        if arguments.is_object() {
            Ok(arguments.clone())
        } else {
            Err(FunctionCallError::InvalidArgument(
                "echo arguments must be an object".to_string(),
            ))
        }
    }
}
