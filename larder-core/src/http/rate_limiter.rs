//! Courtesy pacing between outbound requests.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time::sleep;

/// Enforces a minimum delay between consecutive requests.
///
/// This is politeness toward the data source, not back-pressure: there is no
/// queue and no budget, just a floor on request spacing.
pub struct RateLimiter {
    min_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Sleep until at least `min_delay` has passed since the previous request,
    /// then mark the current request.
    pub async fn pace(&self) {
        if self.min_delay.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_delay {
                sleep(self.min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        // 100ms floor between requests, same pacing the search API tolerates well.
        Self::new(Duration::from_millis(100))
    }
}
