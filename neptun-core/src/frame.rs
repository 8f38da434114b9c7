//! Neptun protocol frame structure and response classification

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;

use neptun_types::LineConfig;
use neptun_types::line::validate_line;

use crate::{
    checksum,
    command::Command,
    constants::{
        REQUEST_HEADER, RESPONSE_CRC_ERROR, RESPONSE_HEADER, RESPONSE_UNKNOWN_COMMAND,
        WRITE_PAYLOAD_PREFIX,
    },
    error::{Error, Result},
};

/// Neptun request frame
///
/// # Frame Structure
///
/// ```text
/// ┌──────────────┬─────────┬──────────┬───────────┬──────────┐
/// │    Header    │ Command │  Length  │  Payload  │   CRC    │
/// │ 02 54 51     │ 1 byte  │ 2 bytes  │  N bytes  │ 2 bytes  │
/// │              │         │ (BE u16) │           │ (BE u16) │
/// └──────────────┴─────────┴──────────┴───────────┴──────────┘
/// ```
///
/// The CRC covers everything before it.
///
/// # Examples
///
/// ```
/// use neptun_core::{CommandFrame, Command};
///
/// let frame = CommandFrame::query_state();
/// assert_eq!(frame.command(), Command::QueryState);
/// assert_eq!(&frame.encode()[..], &[0x02, 0x54, 0x51, 0x52, 0x00, 0x00, 0x2A, 0x45]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CommandFrame {
    command: Command,
    payload: Bytes,
}

impl CommandFrame {
    /// Header + command + length
    pub const PREFIX_SIZE: usize = 6;

    /// CRC trailer size
    pub const CRC_SIZE: usize = 2;

    /// Maximum payload size (16-bit length field)
    pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

    /// Build a frame for a command and payload
    pub fn new(command: Command, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();

        if payload.len() > Self::MAX_PAYLOAD_SIZE {
            return Err(Error::PayloadTooLarge {
                size: payload.len(),
                max: Self::MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self { command, payload })
    }

    /// State query (0x52), empty payload
    pub fn query_state() -> Self {
        Self {
            command: Command::QueryState,
            payload: Bytes::new(),
        }
    }

    /// Control frame (0x57)
    ///
    /// Payload: `53 00 04 [valve] [dry] [auto_close] [line_config]`, each flag
    /// encoded as 0/1.
    ///
    /// # Examples
    ///
    /// ```
    /// use neptun_core::CommandFrame;
    /// use neptun_types::LineConfig;
    ///
    /// let frame = CommandFrame::control(true, false, true, LineConfig::LINE_2);
    /// assert_eq!(&frame.payload()[..], &[0x53, 0x00, 0x04, 1, 0, 1, 0x02]);
    /// ```
    pub fn control(valve_open: bool, dry_mode: bool, auto_close: bool, lines: LineConfig) -> Self {
        let mut payload = BytesMut::with_capacity(7);
        payload.put_slice(&WRITE_PAYLOAD_PREFIX);
        payload.put_u8(valve_open as u8);
        payload.put_u8(dry_mode as u8);
        payload.put_u8(auto_close as u8);
        payload.put_u8(lines.bits());

        Self {
            command: Command::SetControl,
            payload: payload.freeze(),
        }
    }

    /// Counter frame (0x58)
    ///
    /// Payload: `53 00 04 [line] 00 00 00 [value: u32 LE]`.
    pub fn counter(line: u8, value: u32) -> Result<Self> {
        validate_line(line)?;

        let mut payload = BytesMut::with_capacity(11);
        payload.put_slice(&WRITE_PAYLOAD_PREFIX);
        payload.put_u8(line);
        payload.put_slice(&[0x00, 0x00, 0x00]);
        payload.put_u32_le(value);

        Ok(Self {
            command: Command::SetCounter,
            payload: payload.freeze(),
        })
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// Command-specific data
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Value of the length field
    pub fn length(&self) -> u16 {
        // Every constructor keeps the payload within MAX_PAYLOAD_SIZE
        self.payload.len() as u16
    }

    /// Calculate checksum for this frame
    pub fn crc(&self) -> u16 {
        checksum::calculate(&self.unsealed())
    }

    /// Encode frame to bytes, CRC appended
    pub fn encode(&self) -> BytesMut {
        let mut buf = self.unsealed();
        let crc = checksum::calculate(&buf);
        buf.put_u16(crc);
        buf
    }

    /// Get total frame size
    pub fn size(&self) -> usize {
        Self::PREFIX_SIZE + self.payload.len() + Self::CRC_SIZE
    }

    fn unsealed(&self) -> BytesMut {
        let mut buf = BytesMut::with_capacity(self.size());
        buf.put_slice(&REQUEST_HEADER);
        buf.put_u8(self.command.into());
        buf.put_u16(self.length());
        buf.put_slice(&self.payload);
        buf
    }
}

impl fmt::Debug for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandFrame")
            .field("command", &self.command)
            .field("length", &self.length())
            .field("payload", &hex::encode_upper(&self.payload))
            .field("crc", &format!("0x{:04X}", self.crc()))
            .finish()
    }
}

impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame[{}](len={})", self.command, self.payload.len())
    }
}

/// Classification of a raw response by its prefix
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResponseClass {
    Success,

    /// Device rejected the command code (`02 54 41 FB`)
    UnknownCommand,

    /// Device reported a CRC/format error (`02 54 41 FE`)
    CrcError,

    /// No valid response header
    Malformed,
}

impl ResponseClass {
    /// Classify raw response bytes
    ///
    /// Never fails: anything without the `02 54 41` header is `Malformed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use neptun_core::ResponseClass;
    ///
    /// assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x41, 0x52]), ResponseClass::Success);
    /// assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x41, 0xFB]), ResponseClass::UnknownCommand);
    /// assert_eq!(ResponseClass::classify(&[0x02, 0x54]), ResponseClass::Malformed);
    /// ```
    pub fn classify(response: &[u8]) -> Self {
        if !response.starts_with(&RESPONSE_HEADER) {
            return Self::Malformed;
        }

        match response.get(RESPONSE_HEADER.len()) {
            Some(&RESPONSE_UNKNOWN_COMMAND) => Self::UnknownCommand,
            Some(&RESPONSE_CRC_ERROR) => Self::CrcError,
            _ => Self::Success,
        }
    }

    /// Response header present and no error code
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for ResponseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::UnknownCommand => "unknown command",
            Self::CrcError => "CRC/format error",
            Self::Malformed => "malformed response",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_query_state_encoding() {
        let encoded = CommandFrame::query_state().encode();
        assert_eq!(&encoded[..], &[0x02, 0x54, 0x51, 0x52, 0x00, 0x00, 0x2A, 0x45]);
    }

    #[test]
    fn test_control_encoding() {
        let frame = CommandFrame::control(true, false, false, LineConfig::ALL_SENSORS);
        assert_eq!(hex::encode_upper(frame.encode()), "025451570007530004010000007C66");
    }

    #[test]
    fn test_control_all_off_encoding() {
        let frame = CommandFrame::control(false, false, false, LineConfig::ALL_SENSORS);
        assert_eq!(hex::encode_upper(frame.encode()), "025451570007530004000000000AD2");
    }

    #[test]
    fn test_control_flags_are_independent() {
        let frame = CommandFrame::control(false, true, true, LineConfig::LINE_1 | LineConfig::LINE_3);
        assert_eq!(&frame.payload()[..], &[0x53, 0x00, 0x04, 0, 1, 1, 0x05]);
    }

    #[test]
    fn test_counter_encoding() {
        let frame = CommandFrame::counter(2, 0x0102_0304).unwrap();
        assert_eq!(frame.command(), Command::SetCounter);
        assert_eq!(
            &frame.payload()[..],
            &[0x53, 0x00, 0x04, 0x02, 0x00, 0x00, 0x00, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(frame.length(), 11);

        let encoded = frame.encode();
        assert_eq!(&encoded[..6], &[0x02, 0x54, 0x51, 0x58, 0x00, 0x0B]);
        assert!(checksum::verify(&encoded));
    }

    #[test]
    fn test_counter_invalid_line() {
        assert!(matches!(CommandFrame::counter(0, 1), Err(Error::Types(_))));
        assert!(matches!(CommandFrame::counter(4, 1), Err(Error::Types(_))));
    }

    #[test]
    fn test_payload_too_large() {
        let result = CommandFrame::new(Command::SetControl, vec![0u8; 70_000]);
        assert!(matches!(result, Err(Error::PayloadTooLarge { size: 70_000, .. })));

        let result = CommandFrame::new(Command::SetControl, vec![0u8; CommandFrame::MAX_PAYLOAD_SIZE + 1]);
        assert!(matches!(result, Err(Error::PayloadTooLarge { size: 65_536, max: 65_535 })));
    }

    #[test]
    fn test_length_at_payload_limit() {
        let frame = CommandFrame::new(Command::SetControl, vec![0u8; CommandFrame::MAX_PAYLOAD_SIZE]).unwrap();
        assert_eq!(frame.length() as usize, frame.payload().len());
        assert_eq!(frame.length(), u16::MAX);

        let encoded = frame.encode();
        assert_eq!(&encoded[4..6], &[0xFF, 0xFF]);
        assert_eq!(encoded.len(), frame.size());
    }

    #[test]
    fn test_classify() {
        assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x41, 0xFB, 0x00]), ResponseClass::UnknownCommand);
        assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x41, 0xFE]), ResponseClass::CrcError);
        assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x41, 0x57, 0x00]), ResponseClass::Success);
        assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x41]), ResponseClass::Success);
        assert_eq!(ResponseClass::classify(&[0x02, 0x54, 0x51, 0x52]), ResponseClass::Malformed);
        assert_eq!(ResponseClass::classify(&[0x02, 0x54]), ResponseClass::Malformed);
        assert_eq!(ResponseClass::classify(&[]), ResponseClass::Malformed);
    }

    #[test]
    fn test_only_success_is_accepted() {
        assert!(ResponseClass::Success.is_success());
        assert!(!ResponseClass::UnknownCommand.is_success());
        assert!(!ResponseClass::CrcError.is_success());
        assert!(!ResponseClass::Malformed.is_success());

        assert!(ResponseClass::classify(&[0x02, 0x54, 0x41, 0x57, 0x00, 0x00]).is_success());
        assert!(!ResponseClass::classify(&[0x02, 0x54, 0x41, 0xFE]).is_success());
    }

    proptest! {
        #[test]
        fn prop_frame_layout(code in prop_oneof![Just(Command::QueryState), Just(Command::SetControl), Just(Command::SetCounter)],
                             payload in proptest::collection::vec(any::<u8>(), 0..512)) {
            let frame = CommandFrame::new(code, payload.clone()).unwrap();
            let encoded = frame.encode();

            prop_assert_eq!(encoded.len(), payload.len() + 8);
            prop_assert_eq!(&encoded[..3], &REQUEST_HEADER[..]);
            prop_assert_eq!(encoded[3], u8::from(code));
            prop_assert_eq!(u16::from_be_bytes([encoded[4], encoded[5]]) as usize, payload.len());
            prop_assert_eq!(&encoded[6..6 + payload.len()], &payload[..]);

            let body = &encoded[..encoded.len() - 2];
            let crc = u16::from_be_bytes([encoded[encoded.len() - 2], encoded[encoded.len() - 1]]);
            prop_assert_eq!(crc, checksum::calculate(body));
            prop_assert_eq!(crc, frame.crc());
        }

        #[test]
        fn prop_classify_never_panics(data in proptest::collection::vec(any::<u8>(), 0..16)) {
            let _ = ResponseClass::classify(&data);
        }
    }
}
