use async_trait::async_trait;
use log::{debug, info};

use crate::core::{Conversation, FunctionCallError};
use crate::gemini::{ConversationMessage, FunctionCallHandler, FunctionCallPayload, ResultFolder};

use super::registry::ToolRegistry;

/// Handler that executes detected function calls against a [`ToolRegistry`]
/// and keeps the folded results as a conversation transcript.
pub struct ToolDispatcher {
    registry: Option<ToolRegistry>,
    conversation: Conversation,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        for definition in registry.definitions() {
            debug!(
                "[Dispatcher] tool {}: {} (parameters: {})",
                definition.name, definition.description, definition.parameters
            );
        }
        Self {
            registry: Some(registry),
            conversation: Conversation::new(),
        }
    }

    /// Records calls without executing anything.
    pub fn observe_only() -> Self {
        Self {
            registry: None,
            conversation: Conversation::new(),
        }
    }

    pub const fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn into_conversation(self) -> Conversation {
        self.conversation
    }
}

#[async_trait]
impl FunctionCallHandler for ToolDispatcher {
    type Output = Vec<ConversationMessage>;

    async fn on_function_call(
        &mut self,
        call: FunctionCallPayload,
        fold: ResultFolder,
    ) -> Result<Vec<ConversationMessage>, FunctionCallError> {
        self.conversation.record_call(call.clone());

        let Some(registry) = self.registry.as_ref() else {
            debug!("[Dispatcher] tools disabled, not executing {}", call.name);
            return Ok(Vec::new());
        };

        let result = registry.execute(&call).await?;
        debug!("[Dispatcher] {} returned {result}", call.name);

        let messages = fold.fold(&result);
        info!("[Dispatcher] folded {} message(s) from {}", messages.len(), fold.call_name());
        self.conversation.add_messages(messages.iter().cloned());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::FoldPolicy;
    use crate::tools::EchoTool;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry
    }

    fn echo_call() -> FunctionCallPayload {
        FunctionCallPayload::new("echo", json!({ "status": "ok" }).as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn test_dispatch_folds_result() {
        let mut dispatcher = ToolDispatcher::new(registry());
        let messages = dispatcher
            .on_function_call(echo_call(), ResultFolder::new("echo", FoldPolicy::default()))
            .await
            .unwrap();

        assert_eq!(messages, vec![ConversationMessage::new("system", r#"Result: {"status":"ok"}"#)]);
        assert_eq!(dispatcher.conversation().calls(), &[echo_call()]);
        assert_eq!(dispatcher.conversation().messages(), messages.as_slice());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_fails() {
        let mut dispatcher = ToolDispatcher::new(registry());
        let err = dispatcher
            .on_function_call(
                FunctionCallPayload::new("launch", Default::default()),
                ResultFolder::new("launch", FoldPolicy::default()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FunctionCallError::ToolNotFound(name) if name == "launch"));
        assert!(dispatcher.conversation().messages().is_empty());
    }

    #[tokio::test]
    async fn test_observe_only_records_calls() {
        let mut dispatcher = ToolDispatcher::observe_only();
        let messages = dispatcher
            .on_function_call(echo_call(), ResultFolder::new("echo", FoldPolicy::default()))
            .await
            .unwrap();

        assert!(messages.is_empty());
        let conversation = dispatcher.into_conversation();
        assert_eq!(conversation.calls().len(), 1);
        assert!(conversation.messages().is_empty());
    }
}
