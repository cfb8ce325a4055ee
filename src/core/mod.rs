mod config;
pub mod conversation;
pub mod error;

pub use config::Config;
pub use config::FoldConfig;
pub use config::OutputFormat;
pub use conversation::Conversation;
pub use error::{FunctionCallError, StreamError};
