//! Per-event handler interface.
//!
//! Callers hand the walker either a synchronous closure or one returning a
//! future. Both are normalized into [`EventProcessor`], which the state
//! processor awaits once per event.

use std::future::Future;
use std::marker::PhantomData;

use futures::future::{self, BoxFuture, FutureExt};

use super::page_source::BoxError;
use crate::walk::WalkStatus;

/// Outcome of handling one event.
pub type HandlerResult = Result<(), BoxError>;

/// Uniform asynchronous handler contract.
///
/// Takes `&mut self`: events are delivered strictly one at a time, so
/// handlers may accumulate state without locking.
pub trait EventProcessor<E>: Send {
    /// Handle `event`. `status` reflects progress *before* this event.
    fn process_event<'a>(
        &'a mut self,
        event: &'a E,
        status: &'a WalkStatus<E>,
    ) -> BoxFuture<'a, HandlerResult>;
}

/// Adapter for synchronous handlers.
///
/// The closure runs to completion inside `process_event`; the returned
/// future is already resolved.
pub struct SyncEventProcessor<E, F> {
    handler: F,
    _event: PhantomData<fn(&E)>,
}

impl<E, F> SyncEventProcessor<E, F>
where
    F: FnMut(&E, &WalkStatus<E>) -> HandlerResult + Send,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }
}

impl<E, F> EventProcessor<E> for SyncEventProcessor<E, F>
where
    E: Sync,
    F: FnMut(&E, &WalkStatus<E>) -> HandlerResult + Send,
{
    fn process_event<'a>(
        &'a mut self,
        event: &'a E,
        status: &'a WalkStatus<E>,
    ) -> BoxFuture<'a, HandlerResult> {
        let result = (self.handler)(event, status);
        future::ready(result).boxed()
    }
}

/// Adapter for handlers returning a future.
///
/// The handler receives owned copies of the event and status so the
/// returned future does not borrow from the walker.
pub struct AsyncEventProcessor<E, F> {
    handler: F,
    _event: PhantomData<fn(E)>,
}

impl<E, F, Fut> AsyncEventProcessor<E, F>
where
    F: FnMut(E, WalkStatus<E>) -> Fut + Send,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }
}

impl<E, F, Fut> EventProcessor<E> for AsyncEventProcessor<E, F>
where
    E: Clone + Send + Sync,
    F: FnMut(E, WalkStatus<E>) -> Fut + Send,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn process_event<'a>(
        &'a mut self,
        event: &'a E,
        status: &'a WalkStatus<E>,
    ) -> BoxFuture<'a, HandlerResult> {
        (self.handler)(event.clone(), status.clone()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::walk::WalkState;

    fn status() -> WalkStatus<u32> {
        WalkStatus::new(WalkState::default())
    }

    #[tokio::test]
    async fn test_sync_processor_runs_handler_before_returning_future() {
        let mut seen = Vec::new();
        {
            let mut processor = SyncEventProcessor::new(|event: &u32, _: &WalkStatus<u32>| {
                seen.push(*event);
                Ok(())
            });
            let status = status();
            let fut = processor.process_event(&7, &status);
            // Already resolved: polling once is enough.
            assert!(fut.now_or_never().unwrap().is_ok());
        }
        assert_eq!(seen, vec![7]);
    }

    #[tokio::test]
    async fn test_sync_processor_propagates_error() {
        let mut processor = SyncEventProcessor::new(|_: &u32, _: &WalkStatus<u32>| {
            Err::<(), BoxError>("boom".into())
        });
        let status = status();

        let err = processor.process_event(&1, &status).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[tokio::test]
    async fn test_async_processor_awaits_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut processor = AsyncEventProcessor::new(move |event: u32, _status| {
            let counter = Arc::clone(&counter);
            async move {
                tokio::task::yield_now().await;
                counter.fetch_add(event as usize, Ordering::SeqCst);
                Ok(())
            }
        });
        let status = status();

        processor.process_event(&3, &status).await.unwrap();
        processor.process_event(&4, &status).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 7);
    }

    #[tokio::test]
    async fn test_async_processor_propagates_error() {
        let mut processor = AsyncEventProcessor::new(|_: u32, _status| async {
            Err::<(), BoxError>("async boom".into())
        });
        let status = status();

        let err = processor.process_event(&1, &status).await.unwrap_err();
        assert_eq!(err.to_string(), "async boom");
    }
}
