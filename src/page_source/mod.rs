//! Page source implementations.
//!
//! Remote sources live with their callers; the walker only needs the
//! [`PageSource`](crate::interfaces::PageSource) trait.

pub mod memory;

pub use memory::{InjectedFailure, MemoryPageSource};
