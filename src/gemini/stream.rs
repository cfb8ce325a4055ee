use async_stream::try_stream;
use futures::{pin_mut, Stream, StreamExt};
use log::{debug, info};
use std::pin::Pin;

use super::extract::extract_function_call;
use super::fold::{FoldPolicy, ResultFolder};
use super::handler::{FunctionCallHandler, NoHandler};
use super::types::ResponseChunk;
use crate::core::StreamError;
use crate::sink::ChunkSink;

pub type ChunkStream<'a> =
    Pin<Box<dyn Stream<Item = Result<ResponseChunk, StreamError>> + Send + 'a>>;

/// Adapts an upstream of Gemini response chunks into an ordered output stream,
/// awaiting a handler for every chunk that carries a function call.
///
/// Every upstream chunk is forwarded unchanged and in order. The next chunk is
/// not pulled until the previous handler call has settled. A failing upstream
/// or handler ends the stream with that error; the chunk that triggered a
/// handler failure is not forwarded.
pub struct GeminiStream<S, H = NoHandler> {
    upstream: S,
    handler: Option<H>,
    policy: FoldPolicy,
}

impl<S> GeminiStream<S> {
    pub fn new(upstream: S) -> Self {
        Self {
            upstream,
            handler: None,
            policy: FoldPolicy::default(),
        }
    }
}

impl<S, H> GeminiStream<S, H> {
    /// Registers the handler awaited for each detected function call.
    pub fn on_function_call<H2>(self, handler: H2) -> GeminiStream<S, H2>
    where
        H2: FunctionCallHandler,
    {
        GeminiStream {
            upstream: self.upstream,
            handler: Some(handler),
            policy: self.policy,
        }
    }

    /// Sets the role and prefix used by the folders handed to the handler.
    pub fn with_fold_policy(mut self, policy: FoldPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<S, E, H> GeminiStream<S, H>
where
    S: Stream<Item = Result<ResponseChunk, E>> + Send,
    E: Into<StreamError> + Send,
    H: FunctionCallHandler,
{
    /// Lazily drives the adapter. Nothing is pulled from upstream until the result is polled,
    /// and dropping it releases the upstream.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResponseChunk, StreamError>> + Send {
        let Self {
            upstream,
            mut handler,
            policy,
        } = self;

        try_stream! {
            pin_mut!(upstream);
            let mut position = 0usize;

            while let Some(chunk) = upstream.next().await {
                let chunk = chunk?;
                debug!("[Stream] chunk {position} pulled");

                if let Some(handler) = handler.as_mut() {
                    if let Some(call) = extract_function_call(&chunk).cloned() {
                        info!("[Stream] function call detected in chunk {position}: {}", call.name);
                        let fold = ResultFolder::new(&call.name, policy.clone());
                        handler.on_function_call(call, fold).await?;
                        debug!("[Stream] handler settled for chunk {position}");
                    }
                }

                yield chunk;
                position += 1;
            }

            debug!("[Stream] upstream exhausted after {position} chunks");
        }
    }

    pub fn boxed<'a>(self) -> ChunkStream<'a>
    where
        S: 'a,
        E: 'a,
        H: 'a,
    {
        Box::pin(self.into_stream())
    }

    /// Pushes every forwarded chunk into `sink`, closing it on exhaustion.
    ///
    /// On failure the sink is aborted and the error returned. Returns the number of chunks forwarded.
    pub async fn pipe_to<K>(self, sink: &mut K) -> Result<usize, StreamError>
    where
        K: ChunkSink + ?Sized,
    {
        let stream = self.into_stream();
        pin_mut!(stream);
        let mut forwarded = 0;

        while let Some(chunk) = stream.next().await {
            let result = match chunk {
                Ok(chunk) => sink.send(chunk).await,
                Err(err) => Err(err),
            };
            if let Err(err) = result {
                sink.abort(&err).await;
                return Err(err);
            }
            forwarded += 1;
        }

        sink.close().await?;
        Ok(forwarded)
    }
}
