//! High-level device interface

use bytes::BytesMut;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, trace, warn};

use neptun_core::{checksum, CommandFrame, ResponseClass};
use neptun_transport::{RetryPolicy, TcpTransport, Timeouts, Transport};
use neptun_types::{LineConfig, SystemState};

use crate::config::DeviceConfig;
use crate::error::{Error, Result};

/// Neptun leak protection controller
///
/// High-level interface for one controller endpoint. Every operation runs
/// under a device-wide lock, so at most one command sequence is in flight
/// and read-modify-write sequences never interleave. The last decoded state
/// is cached and can be read at any time without waiting for that lock.
///
/// Operations never fail loudly: they log what went wrong and return `false`,
/// leaving the cached state as it was.
///
/// # Examples
///
/// ```no_run
/// use neptun::Device;
///
/// #[tokio::main]
/// async fn main() {
///     let device = Device::new("192.168.1.50", neptun::DEFAULT_PORT);
///
///     if device.refresh().await {
///         if let Some(state) = device.get_cached_state() {
///             println!("{}", state);
///         }
///     }
///
///     device.set_valve_state(false).await;
/// }
/// ```
pub struct Device {
    host: String,
    port: u16,
    config: DeviceConfig,
    transport: Box<dyn Transport>,
    lock: Mutex<()>,
    cache: RwLock<Cache>,
}

#[derive(Debug, Default)]
struct Cache {
    state: Option<SystemState>,
    refreshed: Option<Instant>,
    updated_at: Option<DateTime<Utc>>,
}

/// Flags written by read-modify-write without a confirming re-read
#[derive(Debug, Clone, Copy)]
enum Flag {
    DryMode,
    AutoClose,
}

impl Device {
    /// Create a new device instance (TCP transport, default configuration)
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_config(host, port, DeviceConfig::default())
    }

    /// Create a new device instance with explicit configuration
    pub fn with_config(host: impl Into<String>, port: u16, config: DeviceConfig) -> Self {
        let host = host.into();
        let transport =
            TcpTransport::new(host.clone(), port).with_buffer_size(config.receive_buffer_size);

        Self::with_transport(host, port, config, Box::new(transport))
    }

    /// Create a device on top of any transport
    pub fn with_transport(
        host: impl Into<String>,
        port: u16,
        config: DeviceConfig,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            config,
            transport,
            lock: Mutex::new(()),
            cache: RwLock::new(Cache::default()),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Last successfully decoded state
    pub fn get_cached_state(&self) -> Option<SystemState> {
        self.cache.read().state.clone()
    }

    /// Wall-clock time of the last successful refresh
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.cache.read().updated_at
    }

    /// Check if the last successful refresh is recent enough
    pub fn is_online(&self) -> bool {
        self.is_online_at(Instant::now())
    }

    fn is_online_at(&self, now: Instant) -> bool {
        match self.cache.read().refreshed {
            Some(refreshed) => now.saturating_duration_since(refreshed) < self.config.staleness_window,
            None => false,
        }
    }

    /// Query the controller and replace the cached state
    pub async fn refresh(&self) -> bool {
        let _guard = self.lock.lock().await;

        self.fetch_state().await.map(|_| ()).report("refresh state")
    }

    /// Open or close the valve and confirm the new position
    ///
    /// Reads the current flags first so dry mode and auto-close are written
    /// back unchanged, waits for the actuator to settle, then re-reads the
    /// state. Returns true only if the re-read shows the requested position.
    pub async fn set_valve_state(&self, open: bool) -> bool {
        let _guard = self.lock.lock().await;

        self.write_valve(open).await.report("set valve state")
    }

    /// Enable or disable dry mode
    pub async fn set_dry_mode(&self, enabled: bool) -> bool {
        let _guard = self.lock.lock().await;

        self.write_flag(Flag::DryMode, enabled).await.report("set dry mode")
    }

    /// Enable or disable closing the valve on a leak
    pub async fn set_auto_close(&self, enabled: bool) -> bool {
        let _guard = self.lock.lock().await;

        self.write_flag(Flag::AutoClose, enabled).await.report("set auto-close")
    }

    /// Switch a wired line (1..=3) between leak sensor and counter mode
    pub async fn set_line_mode(&self, line: u8, counter_mode: bool) -> bool {
        let _guard = self.lock.lock().await;

        self.write_line_mode(line, counter_mode).await.report("set line mode")
    }

    /// Set the pulse counter of a wired line (1..=3)
    ///
    /// Switches the line to counter mode first. The two writes are separate
    /// round trips: if the second fails the line stays in counter mode.
    pub async fn set_counter_value(&self, line: u8, value: u32) -> bool {
        let _guard = self.lock.lock().await;

        self.write_counter(line, value).await.report("set counter value")
    }

    // Helper methods, all called with the lock held

    async fn fetch_state(&self) -> Result<SystemState> {
        let response = self
            .send(&CommandFrame::query_state(), &self.config.timeouts, &self.config.retry)
            .await?;

        if !checksum::verify(&response) {
            debug!("State response CRC does not verify ({} bytes)", response.len());
        }

        let state = neptun_core::decode(&response)?;

        debug!("{}: {}", self.host, state);

        let mut cache = self.cache.write();
        cache.state = Some(state.clone());
        cache.refreshed = Some(Instant::now());
        cache.updated_at = Some(Utc::now());

        Ok(state)
    }

    async fn write_valve(&self, open: bool) -> Result<()> {
        let current = self.fetch_state().await?;

        let frame = CommandFrame::control(
            open,
            current.dry_mode,
            current.auto_close,
            LineConfig::ALL_SENSORS,
        );
        self.send(&frame, &self.config.valve_timeouts, &self.config.valve_retry)
            .await?;

        debug!("Waiting {:?} for the valve to settle", self.config.valve_settle_delay);
        sleep(self.config.valve_settle_delay).await;

        let confirmed = self.fetch_state().await?;
        if confirmed.valve_open != open {
            return Err(Error::NotConfirmed {
                expected: open,
                actual: confirmed.valve_open,
            });
        }

        info!("Valve {}", if open { "opened" } else { "closed" });
        Ok(())
    }

    async fn write_flag(&self, flag: Flag, enabled: bool) -> Result<()> {
        let current = self.fetch_state().await?;

        let (dry_mode, auto_close) = match flag {
            Flag::DryMode => (enabled, current.auto_close),
            Flag::AutoClose => (current.dry_mode, enabled),
        };

        let frame = CommandFrame::control(current.valve_open, dry_mode, auto_close, LineConfig::ALL_SENSORS);
        self.send(&frame, &self.config.timeouts, &self.config.retry).await?;

        // Optimistic: no confirming re-read for flag writes
        if let Some(state) = self.cache.write().state.as_mut() {
            match flag {
                Flag::DryMode => state.dry_mode = enabled,
                Flag::AutoClose => state.auto_close = enabled,
            }
        }

        info!("{:?} set to {}", flag, enabled);
        Ok(())
    }

    async fn write_line_mode(&self, line: u8, counter_mode: bool) -> Result<()> {
        let lines = LineConfig::for_line(line, counter_mode)?;
        let current = self.fetch_state().await?;

        let frame = CommandFrame::control(current.valve_open, current.dry_mode, current.auto_close, lines);
        self.send(&frame, &self.config.timeouts, &self.config.retry).await?;

        info!(line, counter_mode, "Line mode set");
        Ok(())
    }

    async fn write_counter(&self, line: u8, value: u32) -> Result<()> {
        let frame = CommandFrame::counter(line, value)?;

        self.write_line_mode(line, true).await?;
        self.send(&frame, &self.config.timeouts, &self.config.retry).await?;

        info!(line, value, "Counter set");
        Ok(())
    }

    /// Send a frame with retries and accept only a success response
    async fn send(&self, frame: &CommandFrame, timeouts: &Timeouts, retry: &RetryPolicy) -> Result<BytesMut> {
        trace!("Sending: {:?}", frame);

        let data = frame.encode();
        let (response, attempts) = retry
            .send_with_retries(self.transport.as_ref(), &data, timeouts)
            .await;

        let response = response.ok_or(Error::NoResponse { attempts })?;

        let class = ResponseClass::classify(&response);
        if !class.is_success() {
            warn!(
                "{} answered {} with {} ({})",
                self.host,
                frame.command(),
                class,
                hex::encode_upper(&response[..response.len().min(6)])
            );
            return Err(Error::Rejected(class));
        }

        Ok(response)
    }
}

/// Collapse an operation result to the boolean the public API reports
trait Report {
    fn report(self, operation: &str) -> bool;
}

impl Report for Result<()> {
    fn report(self, operation: &str) -> bool {
        match self {
            Ok(()) => true,
            Err(e) if e.is_unreachable() => {
                error!("Failed to {}: {}", operation, e);
                false
            }
            Err(e) => {
                warn!("Failed to {}: {}", operation, e);
                false
            }
        }
    }
}
