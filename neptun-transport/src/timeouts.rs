//! Per-attempt timing

use std::time::Duration;

use neptun_core::constants::defaults;

/// Timing of a single connect/send/receive attempt
///
/// A single attempt can block for up to the sum of all four phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Wait before opening the connection
    pub pre_connect_delay: Duration,

    /// Bound on name resolution plus TCP connect
    pub connect_timeout: Duration,

    /// Wait between writing the frame and reading the response
    pub post_send_delay: Duration,

    /// Bound on reading the response
    pub receive_timeout: Duration,
}

impl Timeouts {
    pub fn with_pre_connect_delay(mut self, delay: Duration) -> Self {
        self.pre_connect_delay = delay;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_post_send_delay(mut self, delay: Duration) -> Self {
        self.post_send_delay = delay;
        self
    }

    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Longest time one attempt may take
    pub fn worst_case(&self) -> Duration {
        self.pre_connect_delay + self.connect_timeout + self.post_send_delay + self.receive_timeout
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            pre_connect_delay: defaults::PRE_CONNECT_DELAY,
            connect_timeout: defaults::CONNECT_TIMEOUT,
            post_send_delay: defaults::POST_SEND_DELAY,
            receive_timeout: defaults::RECEIVE_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let timeouts = Timeouts::default();
        assert_eq!(timeouts.pre_connect_delay, Duration::from_millis(500));
        assert_eq!(timeouts.connect_timeout, Duration::from_secs(15));
        assert_eq!(timeouts.post_send_delay, Duration::from_millis(200));
        assert_eq!(timeouts.receive_timeout, Duration::from_secs(20));
        assert_eq!(timeouts.worst_case(), Duration::from_millis(35_700));
    }

    #[test]
    fn test_builders() {
        let timeouts = Timeouts::default()
            .with_receive_timeout(Duration::from_secs(1))
            .with_pre_connect_delay(Duration::ZERO);

        assert_eq!(timeouts.receive_timeout, Duration::from_secs(1));
        assert_eq!(timeouts.pre_connect_delay, Duration::ZERO);
        assert_eq!(timeouts.connect_timeout, Duration::from_secs(15));
    }
}
