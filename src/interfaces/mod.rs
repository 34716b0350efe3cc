//! Abstract interfaces for the walker's collaborators.
//!
//! These traits define the contracts for:
//! - Page sources (the external, paginated event log)
//! - Event processors (caller-supplied per-event logic)

pub mod event_processor;
pub mod page_source;

pub use event_processor::{AsyncEventProcessor, EventProcessor, HandlerResult, SyncEventProcessor};
pub use page_source::{BoxError, Cursor, Page, PageSource};
