//! Decoded controller state

use std::fmt;

use crate::device_info::DeviceInfo;
use crate::error::{Error, Result};
use crate::line::{validate_line, LINE_COUNT};

/// Number of wireless leak sensors reported in the status blob
pub const SENSOR_COUNT: usize = 3;

/// Wireless sensor status code
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SensorStatus {
    Disconnected,
    Triggered,
    Normal,
    Unknown,
}

impl SensorStatus {
    /// Display level derived from the status
    ///
    /// This is the value the controller UI shows next to each sensor; it is
    /// not a signal strength (see [`SensorReading::raw_signal`]).
    pub fn level(self) -> u8 {
        match self {
            Self::Disconnected => 0,
            Self::Triggered => 2,
            Self::Normal => 3,
            Self::Unknown => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Triggered => "triggered",
            Self::Normal => "normal",
            Self::Unknown => "unknown",
        }
    }
}

impl From<u8> for SensorStatus {
    fn from(code: u8) -> Self {
        match code {
            0x00 => Self::Disconnected,
            0x02 => Self::Triggered,
            0x03 => Self::Normal,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Battery percentage from the raw firmware byte
///
/// The firmware reports the charge as a signed byte whose magnitude is the
/// percentage (`0x64` is 100%, `0xD6` is -42 and means 42%).
///
/// # Examples
///
/// ```
/// use neptun_types::state::battery_percent;
///
/// assert_eq!(battery_percent(0x64), 100);
/// assert_eq!(battery_percent(0xD6), 42);
/// ```
pub fn battery_percent(raw: u8) -> u8 {
    (raw as i8).unsigned_abs()
}

/// One wireless leak sensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Slot in the status blob (1..=3)
    pub index: u8,

    /// Sensor number as reported by the controller
    pub reported_index: u8,

    /// Raw status code
    pub raw_state: u8,

    /// Decoded status
    pub status: SensorStatus,

    /// Raw battery byte
    pub raw_battery: u8,

    /// Battery charge, see [`battery_percent`]
    pub battery_percent: u8,

    /// Radio link flag (0 = no signal, 1 = good signal)
    pub raw_signal: u8,
}

impl SensorReading {
    pub fn new(index: u8, raw_state: u8, reported_index: u8, raw_battery: u8, raw_signal: u8) -> Self {
        Self {
            index,
            reported_index,
            raw_state,
            status: SensorStatus::from(raw_state),
            raw_battery,
            battery_percent: battery_percent(raw_battery),
            raw_signal,
        }
    }

    /// Leak detected by this sensor
    pub fn leak_detected(&self) -> bool {
        self.status == SensorStatus::Triggered
    }

    pub fn has_signal(&self) -> bool {
        self.raw_signal == 1
    }

    /// Display level derived from the status byte
    pub fn level(&self) -> u8 {
        self.status.level()
    }
}

/// Snapshot of the controller state
///
/// Only ever produced whole from a complete status response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemState {
    pub valve_open: bool,
    pub dry_mode: bool,
    pub auto_close: bool,
    pub sensors: [SensorReading; SENSOR_COUNT],
    pub counters: [u8; LINE_COUNT as usize],
    pub info: DeviceInfo,
}

impl SystemState {
    /// Any wireless sensor is triggered or has dropped off
    pub fn alarm(&self) -> bool {
        self.sensors
            .iter()
            .any(|s| matches!(s.status, SensorStatus::Triggered | SensorStatus::Disconnected))
    }

    /// Any wireless sensor reports a leak
    pub fn leak_detected(&self) -> bool {
        self.sensors.iter().any(SensorReading::leak_detected)
    }

    /// Wireless sensor by number (1..=3)
    pub fn sensor(&self, number: u8) -> Result<&SensorReading> {
        match number {
            1..=3 => Ok(&self.sensors[number as usize - 1]),
            _ => Err(Error::InvalidSensor(number)),
        }
    }

    /// Raw counter byte for a wired line (1..=3)
    pub fn counter(&self, line: u8) -> Option<u8> {
        validate_line(line).ok()?;
        Some(self.counters[line as usize - 1])
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State[valve={}, dry={}, auto_close={}, sensors={}/{}/{}]",
            if self.valve_open { "open" } else { "closed" },
            self.dry_mode,
            self.auto_close,
            self.sensors[0].status,
            self.sensors[1].status,
            self.sensors[2].status,
        )
    }
}
