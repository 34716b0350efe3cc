//! Minimum-interval rate governor for page fetches.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Delays the next access to a resource until a minimum interval has
/// passed since `last_access`.
///
/// Both fields are set by the owner; the throttle never updates
/// `last_access` itself, so the caller decides when the interval starts.
#[derive(Debug, Clone)]
pub struct ResourceThrottle {
    pub minimum_duration_between_access: Duration,
    pub last_access: Instant,
}

impl ResourceThrottle {
    pub fn new(minimum_duration_between_access: Duration) -> Self {
        Self {
            minimum_duration_between_access,
            last_access: Instant::now(),
        }
    }

    /// Sleep for whatever remains of the interval, if anything.
    ///
    /// Returns the time slept, `Duration::ZERO` when no wait was needed.
    pub async fn wait_for_next_access(&self) -> Duration {
        let elapsed = Instant::now().saturating_duration_since(self.last_access);
        let remaining = self.minimum_duration_between_access.saturating_sub(elapsed);
        if remaining.is_zero() {
            return Duration::ZERO;
        }

        debug!(remaining_ms = remaining.as_millis() as u64, "Throttling next access");
        tokio::time::sleep(remaining).await;
        remaining
    }
}
