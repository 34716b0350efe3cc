//! Page fetch rate configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default minimum interval between page fetches, in milliseconds.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1000;

/// Rate limit applied to the page source for a whole walk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Minimum time between the start of processing one page and the
    /// fetch of the next.
    ///
    /// Default: 1,000. Zero disables throttling.
    pub min_interval_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
        }
    }
}

impl ThrottleConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// No delay between fetches. For local or in-memory sources.
    pub fn unthrottled() -> Self {
        Self { min_interval_ms: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_throttle() {
        let throttle = ThrottleConfig::default();
        assert_eq!(throttle.min_interval_ms, 1000);
        assert_eq!(throttle.min_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_unthrottled() {
        assert_eq!(ThrottleConfig::unthrottled().min_interval(), Duration::ZERO);
    }
}
