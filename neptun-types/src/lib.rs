//! Type definitions for neptun

pub mod device_info;
pub mod error;
pub mod line;
pub mod state;

pub use device_info::DeviceInfo;
pub use error::{Error, Result};
pub use line::LineConfig;
pub use state::{SensorReading, SensorStatus, SystemState};
