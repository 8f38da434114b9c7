//! Wired line configuration
//!
//! Each wired line is either a leak sensor input or a pulse counter input.
//! The controller takes the mode of all lines as one bitmask byte in the
//! control frame: bit `line - 1` set means "counter".

use bitflags::bitflags;

use crate::error::{Error, Result};

/// Number of wired lines on the controller
pub const LINE_COUNT: u8 = 3;

bitflags! {
    /// Line-configuration bitmask carried by the control frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LineConfig: u8 {
        const LINE_1 = 1 << 0;
        const LINE_2 = 1 << 1;
        const LINE_3 = 1 << 2;
    }
}

impl LineConfig {
    /// Every line in leak-sensor mode
    pub const ALL_SENSORS: Self = Self::empty();

    /// Bitmask for a single line switched to the given mode
    ///
    /// Returns an empty mask when `counter_mode` is false.
    ///
    /// # Examples
    ///
    /// ```
    /// use neptun_types::LineConfig;
    ///
    /// assert_eq!(LineConfig::for_line(2, true).unwrap().bits(), 0b010);
    /// assert_eq!(LineConfig::for_line(2, false).unwrap().bits(), 0);
    /// assert!(LineConfig::for_line(4, true).is_err());
    /// ```
    pub fn for_line(line: u8, counter_mode: bool) -> Result<Self> {
        validate_line(line)?;

        if counter_mode {
            Ok(Self::from_bits_truncate(1 << (line - 1)))
        } else {
            Ok(Self::ALL_SENSORS)
        }
    }
}

/// Check that a wired line number is addressable
pub fn validate_line(line: u8) -> Result<()> {
    if (1..=LINE_COUNT).contains(&line) {
        Ok(())
    } else {
        Err(Error::InvalidLine(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_bits() {
        assert_eq!(LineConfig::for_line(1, true).unwrap(), LineConfig::LINE_1);
        assert_eq!(LineConfig::for_line(3, true).unwrap(), LineConfig::LINE_3);
        assert_eq!(LineConfig::for_line(3, true).unwrap().bits(), 0x04);
    }

    #[test]
    fn test_sensor_mode_is_empty() {
        for line in 1..=LINE_COUNT {
            assert!(LineConfig::for_line(line, false).unwrap().is_empty());
        }
    }

    #[test]
    fn test_validate_line() {
        let results: Vec<bool> = (0..=4).map(|line| validate_line(line).is_ok()).collect();
        assert_eq!(results, vec![false, true, true, true, false]);
    }

    #[test]
    fn test_invalid_lines() {
        assert!(matches!(LineConfig::for_line(0, true), Err(Error::InvalidLine(0))));
        assert!(matches!(LineConfig::for_line(4, false), Err(Error::InvalidLine(4))));
    }
}
