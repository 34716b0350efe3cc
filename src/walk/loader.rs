//! Produces walk states by fetching pages.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::error::WalkError;
use super::resume_token::ResumeToken;
use super::state::WalkState;
use crate::interfaces::{Cursor, PageSource};

/// Builds the first state of a walk and each state after it.
///
/// Never returns `Err`: a failed fetch or unreadable resume token is
/// recorded as the returned state's `last_error`, positioned so that a
/// resume token taken from it replays without loss.
pub struct StateLoader<E> {
    page_source: Arc<dyn PageSource<E>>,
}

impl<E> StateLoader<E> {
    pub fn new(page_source: Arc<dyn PageSource<E>>) -> Self {
        Self { page_source }
    }

    /// Load the first page of a walk over `[start_inclusive, end_exclusive)`,
    /// or the page a resume token points at.
    ///
    /// An empty resume token is treated as absent.
    pub async fn load_initial(
        &self,
        start_inclusive: DateTime<Utc>,
        end_exclusive: DateTime<Utc>,
        resume_token: Option<&str>,
    ) -> WalkState<E> {
        let range_cursor = Cursor::new(start_inclusive, end_exclusive);

        let token = match resume_token.map(str::trim).filter(|t| !t.is_empty()) {
            None => None,
            Some(raw) => match ResumeToken::decode(raw) {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable resume token");
                    return WalkState {
                        cursor: Some(range_cursor),
                        page_number: 1,
                        ..WalkState::default()
                    }
                    .with_error(e);
                }
            },
        };

        let cursor = token
            .as_ref()
            .and_then(|t| t.previous_cursor)
            .unwrap_or(range_cursor);
        let page_number = token.as_ref().map_or(1, |t| t.page_number);
        let page_event_index = token.as_ref().map_or(0, |t| t.page_event_index);
        let total_events_processed = token.as_ref().map_or(0, |t| t.total_events_processed);

        match self.page_source.get_page(&cursor).await {
            Ok(page) => {
                let events_count = page.events.len();
                let page_event_index = if page_event_index > events_count {
                    warn!(
                        page_number,
                        page_event_index,
                        events_count,
                        "Resumed page is shorter than the token's index, clamping"
                    );
                    events_count
                } else {
                    page_event_index
                };
                debug!(
                    page_number,
                    page_event_index,
                    events_count,
                    resumed = token.is_some(),
                    "Loaded initial page"
                );
                WalkState {
                    events: Arc::new(page.events),
                    cursor: page.next_page,
                    previous_cursor: Some(cursor),
                    page_event_index,
                    page_number,
                    total_events_processed,
                    last_error: None,
                }
            }
            Err(source) => {
                warn!(page_number, error = %source, "Initial page fetch failed");
                WalkState {
                    events: Arc::new(Vec::new()),
                    cursor: Some(cursor),
                    previous_cursor: token.as_ref().and_then(|t| t.previous_cursor),
                    page_event_index,
                    page_number,
                    total_events_processed,
                    last_error: None,
                }
                .with_error(WalkError::page_fetch(cursor, source))
            }
        }
    }

    /// Load the page after `previous`.
    ///
    /// With no cursor left, returns the empty sentinel state that ends the
    /// walk. On fetch failure, returns `previous` untouched apart from the
    /// error.
    pub async fn load_next(&self, previous: WalkState<E>) -> WalkState<E> {
        let Some(cursor) = previous.cursor else {
            debug!(
                page_number = previous.page_number.saturating_add(1),
                total_events_processed = previous.total_events_processed,
                "Event log exhausted"
            );
            return WalkState {
                events: Arc::new(Vec::new()),
                cursor: None,
                previous_cursor: previous.previous_cursor,
                page_event_index: 0,
                page_number: previous.page_number.saturating_add(1),
                total_events_processed: previous.total_events_processed,
                last_error: None,
            };
        };

        match self.page_source.get_page(&cursor).await {
            Ok(page) => {
                debug!(
                    page_number = previous.page_number.saturating_add(1),
                    events_count = page.events.len(),
                    "Loaded page"
                );
                WalkState {
                    events: Arc::new(page.events),
                    cursor: page.next_page,
                    previous_cursor: Some(cursor),
                    page_event_index: 0,
                    page_number: previous.page_number.saturating_add(1),
                    total_events_processed: previous.total_events_processed,
                    last_error: None,
                }
            }
            Err(source) => {
                warn!(
                    page_number = previous.page_number.saturating_add(1),
                    error = %source,
                    "Page fetch failed"
                );
                previous.with_error(WalkError::page_fetch(cursor, source))
            }
        }
    }
}
