//! Protocol constants

/// Header of every request frame
pub const REQUEST_HEADER: [u8; 3] = [0x02, 0x54, 0x51];

/// Header of every response frame
pub const RESPONSE_HEADER: [u8; 3] = [0x02, 0x54, 0x41];

/// Fourth response byte: device does not know the command
pub const RESPONSE_UNKNOWN_COMMAND: u8 = 0xFB;

/// Fourth response byte: request failed CRC/format check
pub const RESPONSE_CRC_ERROR: u8 = 0xFE;

/// Prefix shared by control (0x57) and counter (0x58) payloads
pub const WRITE_PAYLOAD_PREFIX: [u8; 3] = [0x53, 0x00, 0x04];

/// Minimum length of a decodable status response
pub const STATE_RESPONSE_LEN: usize = 112;

/// Fixed byte offsets inside the status response
pub mod offsets {
    /// Device type string (ASCII)
    pub const DEVICE_TYPE: std::ops::Range<usize> = 9..14;

    /// MAC address string (ASCII)
    pub const MAC_ADDRESS: std::ops::Range<usize> = 17..34;

    /// Valve state, `0x01` = open
    pub const VALVE: usize = 41;

    /// Operating mode, `0x0F` = dry mode
    pub const DRY_MODE: usize = 46;

    /// Auto-close flag, `0x08` = enabled
    pub const AUTO_CLOSE: usize = 47;

    /// First wireless sensor record (state, index, battery, signal)
    pub const SENSOR_BASE: usize = 51;

    /// Distance between wireless sensor records
    pub const SENSOR_STRIDE: usize = 4;

    /// Counter line k lives at `COUNTER_BASE + k`
    pub const COUNTER_BASE: usize = 65;
}

/// Flag values inside the status response
pub mod flags {
    pub const VALVE_OPEN: u8 = 0x01;
    pub const DRY_MODE_ON: u8 = 0x0F;
    pub const AUTO_CLOSE_ON: u8 = 0x08;
}

/// Default timing and retry values
///
/// These are the stability-tuned values; the controller's TCP stack is slow
/// and drops connections opened too quickly after the previous one.
pub mod defaults {
    use std::time::Duration;

    /// Default device port
    pub const PORT: u16 = 6350;

    pub const PRE_CONNECT_DELAY: Duration = Duration::from_millis(500);
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
    pub const POST_SEND_DELAY: Duration = Duration::from_millis(200);
    pub const RECEIVE_TIMEOUT: Duration = Duration::from_secs(20);

    /// Maximum attempts per command
    pub const RETRY_ATTEMPTS: usize = 5;
    pub const RETRY_DELAY: Duration = Duration::from_secs(3);

    /// Valve writes: fewer attempts, the actuator needs time anyway
    pub const VALVE_RETRY_ATTEMPTS: usize = 3;
    pub const VALVE_RETRY_DELAY: Duration = Duration::from_secs(2);

    /// Receive timeout for valve writes; same 20 s as [`RECEIVE_TIMEOUT`],
    /// kept separate so the valve profile can be tuned on its own
    pub const VALVE_RECEIVE_TIMEOUT: Duration = Duration::from_secs(20);

    /// Wait after a valve write before the state is re-read
    pub const VALVE_SETTLE_DELAY: Duration = Duration::from_secs(20);

    /// Device is considered offline after this long without a good refresh
    pub const STALENESS_WINDOW: Duration = Duration::from_secs(600);

    /// Receive buffer for a single response read
    pub const RECEIVE_BUFFER_SIZE: usize = 1024;
}
