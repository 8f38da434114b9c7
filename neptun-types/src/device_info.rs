//! Device identity structures

use std::fmt;

/// Device identity reported inside the status blob
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    /// Controller model (e.g. `N4106`)
    pub device_type: String,

    /// MAC address as printed by the firmware (`XX:XX:XX:XX:XX:XX`)
    pub mac_address: String,
}

impl DeviceInfo {
    pub fn new(device_type: impl Into<String>, mac_address: impl Into<String>) -> Self {
        Self {
            device_type: device_type.into(),
            mac_address: mac_address.into(),
        }
    }
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neptun[{}, MAC: {}]", self.device_type, self.mac_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_device_info_display() {
        let info = DeviceInfo::new("N4106", "60:C5:A8:6F:56:6A");
        assert_eq!(info.to_string(), "Neptun[N4106, MAC: 60:C5:A8:6F:56:6A]");
    }
}
