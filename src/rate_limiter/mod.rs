use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Spaces out outgoing requests so the profile pages and the REST API
/// are polled politely. Only the remainder of the delay is slept, so
/// time spent parsing between requests counts toward the gap.
pub struct RateLimiter {
    min_delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            min_delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(remaining) = self.remaining_delay() {
            sleep(remaining).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn remaining_delay(&self) -> Option<Duration> {
        let last = self.last_request?;
        self.min_delay.checked_sub(last.elapsed())
    }
}
