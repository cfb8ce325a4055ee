use crate::gemini::{ConversationMessage, FunctionCallPayload};

/// Transcript of the function calls seen on a stream and the messages folded from their results.
///
/// Callers continue the dialogue by sending `messages()` back to the model.
#[derive(Debug, Default)]
pub struct Conversation {
    calls: Vec<FunctionCallPayload>,
    messages: Vec<ConversationMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_call(&mut self, call: FunctionCallPayload) {
        self.calls.push(call);
    }

    pub fn add_messages(&mut self, messages: impl IntoIterator<Item = ConversationMessage>) {
        self.messages.extend(messages);
    }

    pub fn calls(&self) -> &[FunctionCallPayload] {
        &self.calls
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ConversationMessage> {
        self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.messages.is_empty()
    }
}
