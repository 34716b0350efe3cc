//! Paginated event log source interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Boxed error returned across caller-supplied seams (page sources, handlers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Position in the event log: the time range still to be fetched.
///
/// A cursor is opaque to the walker. It is only ever built from a walk's
/// range or handed back by the page source as a page's `next_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub start_inclusive: DateTime<Utc>,
    pub end_exclusive: DateTime<Utc>,
}

impl Cursor {
    /// Earliest representable instant; default lower bound of a walk.
    pub const EARLIEST: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;
    /// Latest representable instant; default upper bound of a walk.
    pub const LATEST: DateTime<Utc> = DateTime::<Utc>::MAX_UTC;

    pub fn new(start_inclusive: DateTime<Utc>, end_exclusive: DateTime<Utc>) -> Self {
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Cursor covering the whole log.
    pub fn unbounded() -> Self {
        Self::new(Self::EARLIEST, Self::LATEST)
    }

    /// Whether `at` falls inside `[start_inclusive, end_exclusive)`.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_inclusive && at < self.end_exclusive
    }
}

/// One batch of events plus the cursor of the batch after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<E> {
    pub events: Vec<E>,
    /// `None` once the log is exhausted.
    pub next_page: Option<Cursor>,
}

impl<E> Page<E> {
    pub fn new(events: Vec<E>, next_page: Option<Cursor>) -> Self {
        Self { events, next_page }
    }

    /// Empty terminal page.
    pub fn last_empty() -> Self {
        Self::new(Vec::new(), None)
    }
}

/// Interface to the externally hosted, append-only event log.
///
/// Implementations own transport, authentication and decoding. Every
/// failure is reported as an opaque error; the walker treats all of them
/// as "page fetch failed" and never retries.
///
/// # Implementations
///
/// - `MemoryPageSource`: in-memory log, used for tests and replay
#[async_trait]
pub trait PageSource<E>: Send + Sync {
    /// Fetch the page identified by `cursor`.
    ///
    /// Events must be returned in log order.
    async fn get_page(&self, cursor: &Cursor) -> Result<Page<E>, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cursor_contains_is_half_open() {
        let start = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();
        let cursor = Cursor::new(start, end);

        assert!(cursor.contains(start));
        assert!(!cursor.contains(end));
        assert!(!cursor.contains(start - chrono::Duration::seconds(1)));
    }

    #[test]
    fn test_cursor_serializes_camel_case() {
        let start = Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();
        let json = serde_json::to_value(Cursor::new(start, end)).unwrap();

        assert!(json.get("startInclusive").is_some());
        assert!(json.get("endExclusive").is_some());
    }

    #[test]
    fn test_page_deserializes_missing_next_page_as_none() {
        let page: Page<u32> = serde_json::from_str(r#"{"events":[1,2,3],"nextPage":null}"#).unwrap();
        assert_eq!(page.events, vec![1, 2, 3]);
        assert!(page.next_page.is_none());
    }
}
