//! The walk engine.
//!
//! ```text
//! EventLogWalker
//!   StateLoader::load_initial
//!   loop {
//!     StateProcessor::process_state   (handler per event)
//!     ResourceThrottle::wait_for_next_access
//!     StateLoader::load_next
//!   }
//!   -> WalkStatus
//! ```

pub mod error;
pub mod loader;
pub mod processor;
pub mod resume_token;
pub mod state;
pub mod status;
pub mod walker;

pub use error::WalkError;
pub use loader::StateLoader;
pub use processor::StateProcessor;
pub use resume_token::ResumeToken;
pub use state::WalkState;
pub use status::{PageStatus, WalkStatus};
pub use walker::{EventLogWalker, WalkArgs, DEFAULT_MINIMUM_DURATION_BETWEEN_ACCESS};
