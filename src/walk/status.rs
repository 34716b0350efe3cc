//! Read-only view over a walk state.

use std::sync::Arc;

use super::error::WalkError;
use super::resume_token::ResumeToken;
use super::state::WalkState;

/// Position of the walk within the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// The page has no events.
    Empty,
    /// The first event is next.
    Start,
    /// Between the first and last event.
    InProgress,
    /// The last event is next.
    End,
    /// Every event on the page has been handled.
    Done,
}

impl PageStatus {
    /// Classify `page_event_index` against `page_events_count`.
    ///
    /// `Empty` wins over `Start` at `(0, 0)` and `Start` wins over `End`
    /// on a single-event page.
    pub fn classify(page_event_index: usize, page_events_count: usize) -> Self {
        match (page_event_index, page_events_count) {
            (0, 0) => PageStatus::Empty,
            (0, _) => PageStatus::Start,
            (index, count) if index + 1 == count => PageStatus::End,
            (index, count) if index == count => PageStatus::Done,
            _ => PageStatus::InProgress,
        }
    }
}

/// Snapshot handed to each event handler and returned when a walk ends.
///
/// Built fresh from a state before every handler call and never mutated.
#[derive(Debug)]
pub struct WalkStatus<E> {
    state: WalkState<E>,
}

impl<E> WalkStatus<E> {
    pub fn new(state: WalkState<E>) -> Self {
        Self { state }
    }

    pub fn total_events_processed(&self) -> u64 {
        self.state.total_events_processed
    }

    pub fn page_number(&self) -> u64 {
        self.state.page_number
    }

    pub fn page_event_index(&self) -> usize {
        self.state.page_event_index
    }

    pub fn page_events_count(&self) -> usize {
        self.state.events.len()
    }

    pub fn page_status(&self) -> PageStatus {
        PageStatus::classify(self.page_event_index(), self.page_events_count())
    }

    pub fn last_error(&self) -> Option<&Arc<WalkError>> {
        self.state.last_error.as_ref()
    }

    /// True when the walk reached the end of the log without error.
    ///
    /// A walk also stops without error when the source returns an empty
    /// page that still carries a next cursor. That status is neither
    /// complete nor failed; its `state().cursor` is the page that was never
    /// fetched.
    pub fn is_complete(&self) -> bool {
        self.state.last_error.is_none() && self.state.events.is_empty() && self.state.cursor.is_none()
    }

    pub fn state(&self) -> &WalkState<E> {
        &self.state
    }

    pub fn into_state(self) -> WalkState<E> {
        self.state
    }

    /// Serialized checkpoint pointing at the event this status describes.
    ///
    /// Taken from inside a handler, resuming redelivers the event being
    /// handled. Taken from a failed walk, resuming replays from the failure.
    pub fn resume_token(&self) -> Result<String, WalkError> {
        ResumeToken::from_state(&self.state).encode()
    }
}

impl<E> Clone for WalkStatus<E> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
