//! Adapts Gemini `streamGenerateContent` responses into one ordered chunk stream,
//! detecting function calls embedded in the content and handing them to a caller
//! supplied handler before the chunk moves on.

pub mod cli;
pub mod core;
pub mod eventsource;
pub mod gemini;
pub mod sink;
pub mod tools;

pub use crate::core::{Config, Conversation, FunctionCallError, StreamError};
pub use gemini::{
    extract_function_call, handler_fn, ConversationMessage, FunctionCallHandler,
    FunctionCallPayload, GeminiStream, Part, ResponseChunk, ResultFolder,
};
pub use sink::{ChunkSink, VecSink, WriterSink};
