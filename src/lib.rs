//! Event Log Walker
//!
//! Walks an externally hosted, paginated, append-only event log over a
//! time range, feeding each event to caller-supplied logic in log order.
//! Every walk ends with a [`WalkStatus`] whose resume token restarts an
//! interrupted walk at the last event that was not handled successfully.
//!
//! ```ignore
//! let source: Arc<dyn PageSource<MyEvent>> = Arc::new(MyHttpPageSource::new(...));
//! let walker = EventLogWalker::from_config(source, &Config::load(None)?);
//!
//! let status = walker
//!     .walk_sync(WalkArgs::default().with_resume_token(saved), |event, status| {
//!         if status.page_status() == PageStatus::Start {
//!             save(status.resume_token()?);
//!         }
//!         handle(event)
//!     })
//!     .await;
//!
//! if let Some(error) = status.last_error() {
//!     save(status.resume_token()?);
//! }
//! ```

pub mod config;
pub mod interfaces;
pub mod page_source;
pub mod utils;
pub mod walk;

pub use interfaces::{
    AsyncEventProcessor, BoxError, Cursor, EventProcessor, HandlerResult, Page, PageSource,
    SyncEventProcessor,
};
pub use walk::{
    EventLogWalker, PageStatus, ResumeToken, StateLoader, StateProcessor, WalkArgs, WalkError,
    WalkState, WalkStatus,
};
