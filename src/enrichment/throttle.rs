//! Fixed spacing between outgoing lookup requests.
//!
//! TMDB enforces a request quota, so consecutive calls must be at least
//! `min_interval` apart. The first call goes out immediately.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

/// Enforces a minimum delay between consecutive calls to [`Throttle::wait`].
#[derive(Debug)]
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    /// Create a throttle with the given minimum spacing.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Sleep until the next request is allowed, then record it as sent.
    pub async fn wait(&self) {
        let delay = self
            .last_request
            .lock()
            .map(|last| self.min_interval.saturating_sub(last.elapsed()))
            .unwrap_or_default();

        if !delay.is_zero() {
            tracing::trace!(delay_ms = delay.as_millis() as u64, "Throttling lookup");
            tokio::time::sleep(delay).await;
        }

        *self.last_request.lock() = Some(Instant::now());
    }
}
