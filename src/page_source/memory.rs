//! In-memory page source.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::interfaces::{BoxError, Cursor, Page, PageSource};

/// Error returned while failure injection is armed.
#[derive(Debug, thiserror::Error)]
#[error("Injected page fetch failure")]
pub struct InjectedFailure;

/// Append-only, timestamp-ordered event log served in pages.
///
/// A page holds up to `page_size` events from the cursor's range, extended
/// so that events sharing a timestamp always land on the same page. The
/// next cursor starts at the first timestamp not yet returned.
pub struct MemoryPageSource<E> {
    page_size: usize,
    events: RwLock<Vec<(DateTime<Utc>, E)>>,
    fail_next: RwLock<usize>,
    requested: RwLock<Vec<Cursor>>,
}

impl<E> MemoryPageSource<E> {
    /// `page_size` of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            events: RwLock::new(Vec::new()),
            fail_next: RwLock::new(0),
            requested: RwLock::new(Vec::new()),
        }
    }

    pub fn with_events(page_size: usize, events: impl IntoIterator<Item = (DateTime<Utc>, E)>) -> Self {
        let mut events: Vec<_> = events.into_iter().collect();
        events.sort_by_key(|(at, _)| *at);
        Self {
            events: RwLock::new(events),
            ..Self::new(page_size)
        }
    }

    /// Append an event. Events arriving out of order are placed after every
    /// event with the same or earlier timestamp.
    pub async fn append(&self, at: DateTime<Utc>, event: E) {
        let mut events = self.events.write().await;
        let position = events.partition_point(|(existing, _)| *existing <= at);
        events.insert(position, (at, event));
    }

    /// Make the next `count` fetches fail.
    pub async fn fail_next_fetches(&self, count: usize) {
        *self.fail_next.write().await = count;
    }

    /// Number of `get_page` calls so far, failed ones included.
    pub async fn fetch_count(&self) -> usize {
        self.requested.read().await.len()
    }

    /// Cursors passed to `get_page`, in call order.
    pub async fn requested_cursors(&self) -> Vec<Cursor> {
        self.requested.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl<E> PageSource<E> for MemoryPageSource<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn get_page(&self, cursor: &Cursor) -> Result<Page<E>, BoxError> {
        self.requested.write().await.push(*cursor);

        {
            let mut fail_next = self.fail_next.write().await;
            if *fail_next > 0 {
                *fail_next -= 1;
                return Err(Box::new(InjectedFailure));
            }
        }

        let events = self.events.read().await;
        let in_range: Vec<&(DateTime<Utc>, E)> = events
            .iter()
            .filter(|(at, _)| cursor.contains(*at))
            .collect();

        let mut take = in_range.len().min(self.page_size);
        if let Some((boundary, _)) = take.checked_sub(1).map(|last| in_range[last]) {
            while take < in_range.len() && in_range[take].0 == *boundary {
                take += 1;
            }
        }

        let next_page = in_range.get(take).map(|(at, _)| Cursor {
            start_inclusive: *at,
            end_exclusive: cursor.end_exclusive,
        });
        let page_events = in_range[..take].iter().map(|(_, e)| e.clone()).collect();

        Ok(Page::new(page_events, next_page))
    }
}
