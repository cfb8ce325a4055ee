use crate::eventsource::EventError;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The upstream chunk source failed
    #[error("Upstream error: {0}")]
    Upstream(String),
    /// A chunk payload was not valid JSON for the chunk model
    #[error("Failed to decode chunk: {0}")]
    Decode(#[from] serde_json::Error),
    /// Server-sent event framing errors
    #[error("Event stream error: {0}")]
    Event(#[from] EventError),
    /// The registered function-call handler failed
    #[error("Function call handler failed: {0}")]
    Handler(FunctionCallError),
    /// The downstream sink rejected a chunk
    #[error("Sink error: {0}")]
    Sink(String),
    /// I/O error
    #[error("I/O error: {0}")]
    IOError(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FunctionCallError {
    /// Tool not found error
    #[error("Tool not found: {0}")]
    ToolNotFound(String),
    /// Tool execution error
    #[error("Tool execution failed: {0}")]
    ExecutionError(String),
    /// Invalid argument error
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StreamError {
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<FunctionCallError> for StreamError {
    fn from(err: FunctionCallError) -> Self {
        Self::Handler(err)
    }
}

impl From<std::io::Error> for StreamError {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err.to_string())
    }
}

impl From<std::convert::Infallible> for StreamError {
    fn from(err: std::convert::Infallible) -> Self {
        match err {}
    }
}
