//! Shared utilities for integration tests.
//!
//! Builds an in-memory event log and walkers over it.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use event_log_walker::page_source::MemoryPageSource;
use event_log_walker::utils::bootstrap::init_tracing;
use event_log_walker::{EventLogWalker, PageSource, WalkArgs};

/// An event as a reporting consumer would see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightEvent {
    pub id: u32,
    pub event_type: &'static str,
    pub account_id: u32,
}

const EVENT_TYPES: [&str; 3] = ["login", "page-view", "logout"];

pub fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap() + chrono::Duration::minutes(minute as i64)
}

/// The walk range used by every scenario: one day.
pub fn walk_args() -> WalkArgs {
    WalkArgs::range(at(0), at(24 * 60))
}

/// `count` events one minute apart, served `page_size` per page.
pub fn event_log(count: u32, page_size: usize) -> Arc<MemoryPageSource<InsightEvent>> {
    init_tracing();
    Arc::new(MemoryPageSource::with_events(
        page_size,
        (1..=count).map(|id| {
            (
                at(id),
                InsightEvent {
                    id,
                    event_type: EVENT_TYPES[id as usize % EVENT_TYPES.len()],
                    account_id: id % 4,
                },
            )
        }),
    ))
}

/// Unthrottled walker over `source`.
pub fn walker(source: &Arc<MemoryPageSource<InsightEvent>>) -> EventLogWalker<InsightEvent> {
    EventLogWalker::with_minimum_duration_between_access(
        Arc::clone(source) as Arc<dyn PageSource<InsightEvent>>,
        Duration::ZERO,
    )
}
