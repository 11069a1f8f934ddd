//! Pacing between successive page fetches.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between successive fetches.
///
/// This is a pacing policy, not concurrency control: the fetch loop is
/// sequential and simply waits out the remainder of the delay before each
/// request. The first fetch goes out immediately.
pub struct RateLimiter {
    min_delay: Duration,
    last_fetch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_fetch: Mutex::new(None),
        }
    }

    /// Build from a robots.txt crawl-delay hint, in seconds.
    ///
    /// The hint only ever slows us down: the configured default applies
    /// when it is absent or shorter.
    pub fn from_crawl_delay(crawl_delay: Option<f32>, default: Duration) -> Self {
        let delay = crawl_delay
            .map(|d| Duration::from_millis((d * 1000.0) as u64))
            .filter(|d| *d > default)
            .unwrap_or(default);
        Self::new(delay)
    }

    /// Wait until the minimum delay since the previous fetch has passed.
    pub async fn wait(&self) {
        let mut last = self.last_fetch.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
