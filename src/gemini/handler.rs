use async_trait::async_trait;
use std::future::Future;

use super::fold::ResultFolder;
use super::types::FunctionCallPayload;
use crate::core::FunctionCallError;

/// Callback awaited by the stream adapter for every chunk that carries a function call.
///
/// The stream does not look at `Output`; it exists for handlers that are also
/// driven directly by their owner.
#[async_trait]
pub trait FunctionCallHandler: Send {
    type Output: Send;

    /// Handles one detected call. An error aborts the stream before the triggering chunk is forwarded.
    async fn on_function_call(
        &mut self,
        call: FunctionCallPayload,
        fold: ResultFolder,
    ) -> Result<Self::Output, FunctionCallError>;
}

#[async_trait]
impl<H> FunctionCallHandler for &mut H
where
    H: FunctionCallHandler + ?Sized,
{
    type Output = H::Output;

    async fn on_function_call(
        &mut self,
        call: FunctionCallPayload,
        fold: ResultFolder,
    ) -> Result<Self::Output, FunctionCallError> {
        (**self).on_function_call(call, fold).await
    }
}

/// Placeholder handler type for streams without interception. Never invoked.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHandler;

#[async_trait]
impl FunctionCallHandler for NoHandler {
    type Output = ();

    async fn on_function_call(
        &mut self,
        _call: FunctionCallPayload,
        _fold: ResultFolder,
    ) -> Result<(), FunctionCallError> {
        Ok(())
    }
}

/// Handler backed by an async closure, see [`handler_fn`].
pub struct FnHandler<F> {
    f: F,
}

/// Wraps `f(call, fold)` as a [`FunctionCallHandler`].
pub fn handler_fn<F, Fut, T>(f: F) -> FnHandler<F>
where
    F: FnMut(FunctionCallPayload, ResultFolder) -> Fut + Send,
    Fut: Future<Output = Result<T, FunctionCallError>> + Send + 'static,
    T: Send + 'static,
{
    FnHandler { f }
}

#[async_trait]
impl<F, Fut, T> FunctionCallHandler for FnHandler<F>
where
    F: FnMut(FunctionCallPayload, ResultFolder) -> Fut + Send,
    Fut: Future<Output = Result<T, FunctionCallError>> + Send + 'static,
    T: Send + 'static,
{
    type Output = T;

    async fn on_function_call(
        &mut self,
        call: FunctionCallPayload,
        fold: ResultFolder,
    ) -> Result<T, FunctionCallError> {
        (self.f)(call, fold).await
    }
}
