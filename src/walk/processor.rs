//! Feeds one page of events to the caller's handler.

use tracing::{trace, warn};

use super::error::WalkError;
use super::state::WalkState;
use super::status::WalkStatus;
use crate::interfaces::EventProcessor;

/// Processes the remaining events of a state's page, in order.
#[derive(Debug, Default, Clone, Copy)]
pub struct StateProcessor;

impl StateProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Deliver events `state.page_event_index..` to `processor`.
    ///
    /// Before each call a status is projected over a snapshot positioned at
    /// the event being delivered. If the handler fails, that snapshot is
    /// returned with the error recorded, so the failing event is the first
    /// one redelivered on resume.
    pub async fn process_state<E, P>(&self, processor: &mut P, state: WalkState<E>) -> WalkState<E>
    where
        P: EventProcessor<E> + ?Sized,
    {
        let mut processed: u64 = 0;

        for index in state.page_event_index..state.events.len() {
            let in_progress = WalkState {
                page_event_index: index,
                total_events_processed: state.total_events_processed.saturating_add(processed),
                ..state.clone()
            };
            let status = WalkStatus::new(in_progress);

            trace!(page_number = state.page_number, page_event_index = index, "Processing event");
            if let Err(source) = processor.process_event(&state.events[index], &status).await {
                warn!(
                    page_number = state.page_number,
                    page_event_index = index,
                    error = %source,
                    "Event handler failed"
                );
                return status
                    .into_state()
                    .with_error(WalkError::handler(state.page_number, index, source));
            }
            processed += 1;
        }

        WalkState {
            page_event_index: state.events.len(),
            total_events_processed: state.total_events_processed.saturating_add(processed),
            ..state
        }
    }
}
