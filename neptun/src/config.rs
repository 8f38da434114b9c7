//! Device configuration
//!
//! Every timing and retry knob in one place. Defaults are the
//! stability-tuned values from [`neptun_core::constants::defaults`].

use std::time::Duration;

use neptun_core::constants::defaults;
use neptun_transport::{RetryPolicy, Timeouts};

/// Timing and retry configuration for a [`Device`](crate::Device)
///
/// | field | default |
/// |---|---|
/// | `timeouts` | 0.5 s pre-connect, 15 s connect, 0.2 s post-send, 20 s receive |
/// | `retry` | 5 attempts, 3 s apart |
/// | `valve_timeouts` | as `timeouts`, 20 s receive |
/// | `valve_retry` | 3 attempts, 2 s apart |
/// | `valve_settle_delay` | 20 s |
/// | `staleness_window` | 10 min |
/// | `receive_buffer_size` | 1024 bytes |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Timing for state queries and flag writes
    pub timeouts: Timeouts,

    /// Retries for state queries and flag writes
    pub retry: RetryPolicy,

    /// Timing for valve writes
    pub valve_timeouts: Timeouts,

    /// Retries for valve writes
    pub valve_retry: RetryPolicy,

    /// Wait after a valve write before confirming the new position
    pub valve_settle_delay: Duration,

    /// Age of the last good refresh after which the device is offline
    pub staleness_window: Duration,

    /// Size of the single response read
    pub receive_buffer_size: usize,
}

impl DeviceConfig {
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_valve_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.valve_timeouts = timeouts;
        self
    }

    pub fn with_valve_retry(mut self, retry: RetryPolicy) -> Self {
        self.valve_retry = retry;
        self
    }

    pub fn with_valve_settle_delay(mut self, delay: Duration) -> Self {
        self.valve_settle_delay = delay;
        self
    }

    pub fn with_staleness_window(mut self, window: Duration) -> Self {
        self.staleness_window = window;
        self
    }

    pub fn with_receive_buffer_size(mut self, size: usize) -> Self {
        self.receive_buffer_size = size;
        self
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let timeouts = Timeouts::default();

        Self {
            timeouts,
            retry: RetryPolicy::default(),
            valve_timeouts: timeouts.with_receive_timeout(defaults::VALVE_RECEIVE_TIMEOUT),
            valve_retry: RetryPolicy::new(defaults::VALVE_RETRY_ATTEMPTS, defaults::VALVE_RETRY_DELAY),
            valve_settle_delay: defaults::VALVE_SETTLE_DELAY,
            staleness_window: defaults::STALENESS_WINDOW,
            receive_buffer_size: defaults::RECEIVE_BUFFER_SIZE,
        }
    }
}
