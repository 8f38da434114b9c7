//! Neptun protocol command definitions

use std::fmt;

/// Protocol command codes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Read the full system state (also carries device identity)
    QueryState = 0x52,

    /// Write valve, mode flags and line configuration
    SetControl = 0x57,

    /// Write a pulse counter value
    SetCounter = 0x58,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::QueryState => "SYSTEM_STATE",
            Self::SetControl => "SET_SYSTEM_STATE",
            Self::SetCounter => "SET_COUNTER_VALUE",
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
