//! # neptun
//!
//! Rust client for Neptun leak protection controllers over the local
//! TCP protocol (port 6350).
//!
//! ## Features
//!
//! - Status polling with a cached last-known state
//! - Valve control with confirmation re-read
//! - Dry mode, auto-close, line mode and counter writes
//! - Serialized command sequences per device
//! - Bounded fixed-delay retries with conservative default timings
//!
//! ## Quick Start
//!
//! ```no_run
//! use neptun::Device;
//!
//! #[tokio::main]
//! async fn main() {
//!     let device = Device::new("192.168.1.50", neptun::DEFAULT_PORT);
//!
//!     if device.refresh().await {
//!         if let Some(state) = device.get_cached_state() {
//!             println!("{}", state);
//!             for sensor in &state.sensors {
//!                 println!("  sensor {}: {} ({}%)", sensor.index, sensor.status, sensor.battery_percent);
//!             }
//!         }
//!     }
//!
//!     // Close the valve; waits for the actuator and re-reads to confirm
//!     let closed = device.set_valve_state(false).await;
//!     println!("valve closed: {}", closed);
//! }
//! ```

pub mod config;
pub mod device;
pub mod error;

// Re-exports
pub use config::DeviceConfig;
pub use device::Device;
pub use error::{Error, Result};

// Re-export types
pub use neptun_core::{Command, CommandFrame, ResponseClass, DEFAULT_PORT};
pub use neptun_transport::{RetryPolicy, TcpTransport, Timeouts, Transport};
pub use neptun_types::{DeviceInfo, LineConfig, SensorReading, SensorStatus, SystemState};
