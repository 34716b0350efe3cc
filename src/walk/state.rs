//! Traversal progress snapshot.

use std::sync::Arc;

use super::error::WalkError;
use crate::interfaces::Cursor;

/// Progress of a walk at one step.
///
/// States are replaced, never mutated: the loader and processor each take a
/// state and return its successor. `events` is shared so the per-event
/// snapshots built while processing a page are cheap.
///
/// Invariant: `0 <= page_event_index <= events.len()`.
#[derive(Debug)]
pub struct WalkState<E> {
    /// Events of the current page, in log order. Empty before the first
    /// fetch and once the log is exhausted.
    pub events: Arc<Vec<E>>,
    /// Cursor of the next page to fetch. `None` when no pages remain.
    pub cursor: Option<Cursor>,
    /// Cursor that produced `events`. Replayed on resume.
    pub previous_cursor: Option<Cursor>,
    /// Index of the next event in `events` still to be processed.
    pub page_event_index: usize,
    /// 1-based ordinal of the current page.
    pub page_number: u64,
    /// Events handled successfully since the walk (or resumed walk) began.
    pub total_events_processed: u64,
    /// Set only on a state that ends the walk.
    pub last_error: Option<Arc<WalkError>>,
}

impl<E> WalkState<E> {
    pub fn page_events_count(&self) -> usize {
        self.events.len()
    }

    /// Whether every event on the current page has been handled.
    pub fn is_page_done(&self) -> bool {
        self.page_event_index >= self.events.len()
    }

    /// Whether the walk loop must stop at this state.
    pub fn is_terminal(&self) -> bool {
        self.last_error.is_some() || self.events.is_empty()
    }

    /// Same position, with `error` recorded.
    pub fn with_error(self, error: WalkError) -> Self {
        Self {
            last_error: Some(Arc::new(error)),
            ..self
        }
    }
}

impl<E> Default for WalkState<E> {
    fn default() -> Self {
        Self {
            events: Arc::new(Vec::new()),
            cursor: None,
            previous_cursor: None,
            page_event_index: 0,
            page_number: 0,
            total_events_processed: 0,
            last_error: None,
        }
    }
}

impl<E> Clone for WalkState<E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            cursor: self.cursor,
            previous_cursor: self.previous_cursor,
            page_event_index: self.page_event_index,
            page_number: self.page_number,
            total_events_processed: self.total_events_processed,
            last_error: self.last_error.clone(),
        }
    }
}
