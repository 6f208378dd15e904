//! Sliding-window request throttle.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Admits at most `limit` calls per `window`, shared safely between tasks.
#[derive(Debug)]
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter. A limit of 0 is treated as 1.
    pub fn new(limit: usize, window: Duration) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            window,
            admitted: Mutex::new(VecDeque::with_capacity(limit)),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait until a call may proceed, then record it.
    pub async fn wait(&self) {
        loop {
            let wake_at = {
                let mut admitted = self.admitted.lock().await;
                let now = Instant::now();
                while admitted
                    .front()
                    .is_some_and(|&t| now.duration_since(t) >= self.window)
                {
                    admitted.pop_front();
                }

                if admitted.len() < self.limit {
                    admitted.push_back(now);
                    return;
                }

                match admitted.front() {
                    Some(&oldest) => oldest + self.window,
                    None => continue,
                }
            };

            tracing::trace!(?wake_at, "rate limit reached, waiting");
            sleep_until(wake_at).await;
        }
    }
}
