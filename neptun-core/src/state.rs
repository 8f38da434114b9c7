//! Status response decoding
//!
//! The state query returns a fixed 112-byte blob. Fields are read at fixed
//! offsets; see [`crate::constants::offsets`].

use tracing::trace;

use neptun_types::{DeviceInfo, SensorReading, SystemState};

use crate::constants::{flags, offsets, STATE_RESPONSE_LEN};
use crate::error::{Error, Result};

/// Decode a status response into a [`SystemState`]
///
/// All-or-nothing: a response shorter than 112 bytes is rejected before any
/// field is read. Unknown sensor codes are kept as data, never rejected.
///
/// # Errors
///
/// Returns [`Error::ResponseTooShort`] if the response is shorter than 112 bytes.
pub fn decode(response: &[u8]) -> Result<SystemState> {
    if response.len() < STATE_RESPONSE_LEN {
        return Err(Error::ResponseTooShort {
            expected: STATE_RESPONSE_LEN,
            actual: response.len(),
        });
    }

    let state = SystemState {
        valve_open: response[offsets::VALVE] == flags::VALVE_OPEN,
        dry_mode: response[offsets::DRY_MODE] == flags::DRY_MODE_ON,
        auto_close: response[offsets::AUTO_CLOSE] == flags::AUTO_CLOSE_ON,
        sensors: std::array::from_fn(|i| decode_sensor(response, i)),
        counters: std::array::from_fn(|i| response[offsets::COUNTER_BASE + 1 + i]),
        info: decode_info(response),
    };

    trace!("Decoded {}", state);

    Ok(state)
}

/// Sensor record `slot` (0-based): state, index, battery, signal
fn decode_sensor(response: &[u8], slot: usize) -> SensorReading {
    let base = offsets::SENSOR_BASE + offsets::SENSOR_STRIDE * slot;

    SensorReading::new(
        slot as u8 + 1,
        response[base],
        response[base + 1],
        response[base + 2],
        response[base + 3],
    )
}

fn decode_info(response: &[u8]) -> DeviceInfo {
    DeviceInfo::new(
        ascii_field(&response[offsets::DEVICE_TYPE]),
        ascii_field(&response[offsets::MAC_ADDRESS]),
    )
}

fn ascii_field(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

/// Status response captured from an N4106 (sensor 1 battery at 42%)
#[cfg(test)]
pub(crate) const CAPTURED_STATE: &str = concat!(
    "0254415200684900054E343130364D001136303A43353A41383A36463A35363A36414100010053",
    "00070103000000000473000C0301D60003026400020364004C00040200000043001400000000",
    "0100000000010000000001000000000144000A31343932333836313033570001043F0E",
);
