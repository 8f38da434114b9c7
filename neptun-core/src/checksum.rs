//! Neptun frame checksum
//!
//! CRC16-CCITT as used by the controller firmware:
//! 1. Polynomial 0x1021, initial value 0xFFFF
//! 2. Each byte is XORed into the high byte, then 8 MSB-first shift steps
//! 3. No final XOR, no bit reflection
//! 4. Appended to the frame high byte first

use tracing::trace;

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;

/// Calculate the CRC16 of a byte sequence
///
/// # Examples
///
/// ```
/// use neptun_core::checksum;
///
/// // State query frame without its trailer
/// let crc = checksum::calculate(&[0x02, 0x54, 0x51, 0x52, 0x00, 0x00]);
/// assert_eq!(crc, 0x2A45);
/// ```
pub fn calculate(data: &[u8]) -> u16 {
    let mut crc = INITIAL;

    for &byte in data {
        crc ^= (byte as u16) << 8;

        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }

    trace!(
        len = data.len(),
        checksum = format!("0x{:04X}", crc),
        "Calculated checksum"
    );

    crc
}

/// CRC16 split into `(hi, lo)` wire bytes
pub fn calculate_bytes(data: &[u8]) -> (u8, u8) {
    let [hi, lo] = calculate(data).to_be_bytes();
    (hi, lo)
}

/// Verify the trailing two CRC bytes of a complete frame
pub fn verify(frame: &[u8]) -> bool {
    if frame.len() < 2 {
        return false;
    }

    let (body, trailer) = frame.split_at(frame.len() - 2);
    calculate(body) == u16::from_be_bytes([trailer[0], trailer[1]])
}
