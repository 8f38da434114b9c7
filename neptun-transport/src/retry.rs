//! Bounded fixed-delay retries
//!
//! Each attempt is a brand-new exchange (new connection, same frame). No
//! backoff, no jitter: the controller either answers or it does not.

use std::time::Duration;

use bytes::BytesMut;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use neptun_core::constants::defaults;

use crate::{Timeouts, Transport};

/// Retry policy for a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Attempts including the first one (at least 1)
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Wait between a failed attempt and the next one
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Send a frame until a non-empty response arrives
    ///
    /// Returns the response and the 1-based attempt that produced it, or
    /// `(None, max_attempts)` once the budget is spent. Sleeps `retry_delay`
    /// between attempts, never after the last one.
    pub async fn send_with_retries(
        &self,
        transport: &dyn Transport,
        frame: &[u8],
        timeouts: &Timeouts,
    ) -> (Option<BytesMut>, usize) {
        let max_attempts = self.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            debug!(attempt, max_attempts, "Sending {} bytes", frame.len());

            match transport.exchange(frame, timeouts).await {
                Some(response) if !response.is_empty() => {
                    debug!(attempt, len = response.len(), "Response received");
                    return (Some(response), attempt);
                }
                _ => {
                    warn!(attempt, max_attempts, "No response");
                }
            }

            if attempt < max_attempts {
                debug!("Retrying in {:?}", self.retry_delay);
                sleep(self.retry_delay).await;
            }
        }

        error!(attempts = max_attempts, "No response after all attempts");

        (None, max_attempts)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(defaults::RETRY_ATTEMPTS, defaults::RETRY_DELAY)
    }
}
