//! Errors captured into a walk's final state.

use crate::interfaces::{BoxError, Cursor};

/// Errors that end a walk.
///
/// None of these escape `EventLogWalker::walk*`; they are recorded in
/// `WalkState::last_error` at the most recent resumable position.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("Page fetch failed: {source}")]
    PageFetch {
        cursor: Cursor,
        #[source]
        source: BoxError,
    },

    #[error("Invalid resume token: {0}")]
    ResumeTokenDecode(#[source] serde_json::Error),

    #[error("Resume token could not be encoded: {0}")]
    ResumeTokenEncode(#[source] serde_json::Error),

    #[error("Event handler failed at page {page_number}, index {page_event_index}: {source}")]
    Handler {
        page_number: u64,
        page_event_index: usize,
        #[source]
        source: BoxError,
    },
}

impl WalkError {
    pub fn page_fetch(cursor: Cursor, source: BoxError) -> Self {
        WalkError::PageFetch { cursor, source }
    }

    pub fn handler(page_number: u64, page_event_index: usize, source: BoxError) -> Self {
        WalkError::Handler {
            page_number,
            page_event_index,
            source,
        }
    }

    /// Returns true if the page source failed.
    pub fn is_page_fetch(&self) -> bool {
        matches!(self, WalkError::PageFetch { .. })
    }

    /// Returns true if the caller's handler failed.
    pub fn is_handler(&self) -> bool {
        matches!(self, WalkError::Handler { .. })
    }

    /// Returns true if a resume token could not be read or written.
    pub fn is_resume_token(&self) -> bool {
        matches!(
            self,
            WalkError::ResumeTokenDecode(_) | WalkError::ResumeTokenEncode(_)
        )
    }
}
