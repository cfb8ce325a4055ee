use serde_json::Value;

use super::types::ConversationMessage;

const DEFAULT_ROLE: &str = "system";
const DEFAULT_PREFIX: &str = "Result: ";

/// Role and content prefix used when folding a function result into a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldPolicy {
    role: String,
    prefix: String,
}

impl Default for FoldPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE, DEFAULT_PREFIX)
    }
}

impl FoldPolicy {
    pub fn new(role: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            prefix: prefix.into(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

/// Turns the result of executing one detected function call into conversation messages.
///
/// Handed to the handler together with the call it is bound to.
#[derive(Debug, Clone)]
pub struct ResultFolder {
    call_name: String,
    policy: FoldPolicy,
}

impl ResultFolder {
    pub fn new(call_name: impl Into<String>, policy: FoldPolicy) -> Self {
        Self {
            call_name: call_name.into(),
            policy,
        }
    }

    /// Name of the function call this folder was created for.
    pub fn call_name(&self) -> &str {
        &self.call_name
    }

    /// Renders `result` as compact JSON in a single message. Pure and deterministic.
    pub fn fold(&self, result: &Value) -> Vec<ConversationMessage> {
        vec![ConversationMessage::new(
            self.policy.role(),
            format!("{}{result}", self.policy.prefix()),
        )]
    }
}
