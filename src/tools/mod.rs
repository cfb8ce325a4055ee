pub mod dispatcher;
pub mod echo;
pub mod registry;
pub mod types;

pub use dispatcher::ToolDispatcher;
pub use echo::EchoTool;
pub use registry::ToolRegistry;
pub use types::*;
