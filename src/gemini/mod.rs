pub mod classifier;
pub mod extract;
pub mod fold;
pub mod handler;
pub mod stream;
pub mod types;

pub use extract::extract_function_call;
pub use fold::{FoldPolicy, ResultFolder};
pub use handler::{handler_fn, FnHandler, FunctionCallHandler, NoHandler};
pub use stream::{ChunkStream, GeminiStream};
pub use types::{
    Candidate, Content, ConversationMessage, FunctionCallContainer, FunctionCallPayload, Part,
    ResponseChunk, TextPart,
};
