use log::debug;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::io::ReaderStream;

use super::args::Args;
use crate::{
    core::{Config, Conversation, StreamError},
    eventsource::chunk_stream,
    gemini::GeminiStream,
    sink::WriterSink,
    tools::{EchoTool, ToolDispatcher, ToolRegistry},
};

/// Creates the function-call handler for a replay
///
/// # Arguments
/// * `enable_tools` - Whether detected calls are executed or only recorded
fn create_dispatcher(enable_tools: bool) -> ToolDispatcher {
    if enable_tools {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        ToolDispatcher::new(registry)
    } else {
        ToolDispatcher::observe_only()
    }
}

async fn open_input(path: &Path) -> Result<Box<dyn AsyncRead + Unpin + Send>, StreamError> {
    if path == Path::new("-") {
        return Ok(Box::new(tokio::io::stdin()));
    }

    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| StreamError::IOError(format!("Failed to open {}: {e}", path.display())))?;
    Ok(Box::new(file))
}

/// Runs a recorded SSE response through the stream adapter, writing forwarded chunks to `writer`.
///
/// # Returns
/// The transcript of detected calls and folded messages.
pub async fn replay<R, W>(reader: R, writer: W, config: &Config) -> Result<Conversation, StreamError>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send,
{
    let mut dispatcher = create_dispatcher(config.enable_tools);
    let mut sink = WriterSink::new(writer, config.output);

    let forwarded = GeminiStream::new(chunk_stream(ReaderStream::new(reader)))
        .with_fold_policy(config.fold_policy())
        .on_function_call(&mut dispatcher)
        .pipe_to(&mut sink)
        .await?;

    debug!(
        "[Replay] forwarded {forwarded} chunks, {} function call(s)",
        dispatcher.conversation().calls().len()
    );
    Ok(dispatcher.into_conversation())
}

fn print_transcript(conversation: &Conversation) {
    for call in conversation.calls() {
        eprintln!("function call: {call}");
    }
    for message in conversation.messages() {
        eprintln!("{message}");
    }
}

pub async fn run(args: Args) -> Result<(), StreamError> {
    let mut config = match args.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(enable_tools) = args.enable_tools {
        config.enable_tools = enable_tools;
    }
    if let Some(format) = args.format {
        config.output = format;
    }

    debug!(
        "[SETTINGS] input: {}, output: {:?}, tool_enabled: {}",
        args.input.display(),
        config.output,
        config.enable_tools
    );

    let reader = open_input(&args.input).await?;
    let conversation = replay(reader, tokio::io::stdout(), &config).await?;

    if !conversation.is_empty() {
        print_transcript(&conversation);
    }
    Ok(())
}
