//! Walk orchestration: load, process, throttle, repeat.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{info, warn};

use super::loader::StateLoader;
use super::processor::StateProcessor;
use super::status::WalkStatus;
use crate::config::Config;
use crate::interfaces::{
    AsyncEventProcessor, Cursor, EventProcessor, HandlerResult, PageSource, SyncEventProcessor,
};
use crate::utils::throttle::ResourceThrottle;

/// Default minimum interval between page fetches.
pub const DEFAULT_MINIMUM_DURATION_BETWEEN_ACCESS: Duration = Duration::from_secs(1);

/// Range and optional checkpoint for one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkArgs {
    pub start_inclusive: DateTime<Utc>,
    pub end_exclusive: DateTime<Utc>,
    /// Token from a previous walk's status. When present it decides where
    /// fetching resumes; the range should match the walk that produced it.
    pub resume_token: Option<String>,
}

impl Default for WalkArgs {
    fn default() -> Self {
        Self {
            start_inclusive: Cursor::EARLIEST,
            end_exclusive: Cursor::LATEST,
            resume_token: None,
        }
    }
}

impl WalkArgs {
    pub fn range(start_inclusive: DateTime<Utc>, end_exclusive: DateTime<Utc>) -> Self {
        Self {
            start_inclusive,
            end_exclusive,
            resume_token: None,
        }
    }

    pub fn with_resume_token(mut self, token: impl Into<String>) -> Self {
        self.resume_token = Some(token.into());
        self
    }
}

/// Walks a paginated event log, one page and one event at a time.
///
/// Page fetches are spaced at least `minimum_duration_between_access`
/// apart, measured from when processing of the previous page began.
/// Errors from the page source, the resume token, or the handler end the
/// walk and are reported in the returned status, never as `Err`.
pub struct EventLogWalker<E> {
    loader: StateLoader<E>,
    processor: StateProcessor,
    minimum_duration_between_access: Duration,
}

impl<E> EventLogWalker<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new(page_source: Arc<dyn PageSource<E>>) -> Self {
        Self::with_minimum_duration_between_access(
            page_source,
            DEFAULT_MINIMUM_DURATION_BETWEEN_ACCESS,
        )
    }

    pub fn with_minimum_duration_between_access(
        page_source: Arc<dyn PageSource<E>>,
        minimum_duration_between_access: Duration,
    ) -> Self {
        Self {
            loader: StateLoader::new(page_source),
            processor: StateProcessor::new(),
            minimum_duration_between_access,
        }
    }

    pub fn from_config(page_source: Arc<dyn PageSource<E>>, config: &Config) -> Self {
        Self::with_minimum_duration_between_access(page_source, config.throttle.min_interval())
    }

    pub fn minimum_duration_between_access(&self) -> Duration {
        self.minimum_duration_between_access
    }

    /// Walk with a synchronous handler.
    pub async fn walk_sync<F>(&self, args: WalkArgs, handler: F) -> WalkStatus<E>
    where
        F: FnMut(&E, &WalkStatus<E>) -> HandlerResult + Send,
    {
        self.walk(args, &mut SyncEventProcessor::new(handler)).await
    }

    /// Walk with a handler returning a future.
    pub async fn walk_async<F, Fut>(&self, args: WalkArgs, handler: F) -> WalkStatus<E>
    where
        F: FnMut(E, WalkStatus<E>) -> Fut + Send,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.walk(args, &mut AsyncEventProcessor::new(handler)).await
    }

    /// Walk, delivering every event to `processor`.
    pub async fn walk<P>(&self, args: WalkArgs, processor: &mut P) -> WalkStatus<E>
    where
        P: EventProcessor<E> + ?Sized,
    {
        info!(
            start_inclusive = %args.start_inclusive,
            end_exclusive = %args.end_exclusive,
            resuming = args.resume_token.is_some(),
            "Starting event log walk"
        );

        let mut throttle = ResourceThrottle::new(self.minimum_duration_between_access);
        let mut state = self
            .loader
            .load_initial(
                args.start_inclusive,
                args.end_exclusive,
                args.resume_token.as_deref(),
            )
            .await;

        while !state.is_terminal() {
            throttle.last_access = Instant::now();
            state = self.processor.process_state(&mut *processor, state).await;
            if state.last_error.is_some() {
                break;
            }

            throttle.wait_for_next_access().await;
            state = self.loader.load_next(state).await;
        }

        match &state.last_error {
            Some(error) => warn!(
                page_number = state.page_number,
                page_event_index = state.page_event_index,
                total_events_processed = state.total_events_processed,
                error = %error,
                "Event log walk stopped"
            ),
            None => info!(
                page_number = state.page_number,
                total_events_processed = state.total_events_processed,
                "Event log walk complete"
            ),
        }

        WalkStatus::new(state)
    }
}
