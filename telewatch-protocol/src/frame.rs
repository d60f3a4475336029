//! Frame encoding and decoding for the companion link.
//!
//! Frame format:
//! - START (1 byte): 0x5A synchronization byte
//! - TYPE (1 byte): message type identifier
//! - LENGTH (1 byte): payload length (0-64)
//! - PAYLOAD (0-64 bytes): postcard-encoded message body
//! - CRC (1 byte): CRC-8/SMBUS over TYPE, LENGTH and PAYLOAD

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x5A;

/// Maximum payload size in bytes
///
/// A full settings dictionary encodes to well under this; the limit only
/// bounds the parser buffer.
pub const MAX_PAYLOAD_SIZE: usize = 64;

/// Maximum complete frame size (START + TYPE + LENGTH + MAX_PAYLOAD + CRC)
pub const MAX_FRAME_SIZE: usize = 3 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    InvalidCrc,
    /// Declared length is out of range
    InvalidLength,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            msg_type,
            payload: bytes,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        let end = 3 + self.payload.len();

        buffer[0] = FRAME_START;
        buffer[1] = self.msg_type;
        buffer[2] = length;
        buffer[3..end].copy_from_slice(&self.payload);
        buffer[end] = crc8(&buffer[1..end]);

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| FrameError::BufferTooSmall)
    }
}

/// CRC-8/SMBUS (polynomial 0x07, init 0x00)
pub fn crc8(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |crc, &byte| crc8_update(crc, byte))
}

fn crc8_update(crc: u8, byte: u8) -> u8 {
    let mut crc = crc ^ byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ 0x07
        } else {
            crc << 1
        };
    }
    crc
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Hunting for START
    Sync,
    /// Got START, next byte is TYPE
    Type,
    /// Got TYPE, next byte is LENGTH
    Length,
    /// Collecting payload bytes
    Payload,
    /// Next byte is the CRC
    Crc,
}

/// Incremental parser for frames arriving byte by byte
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    msg_type: u8,
    length: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
    crc: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub const fn new() -> Self {
        Self {
            state: ParseState::Sync,
            msg_type: 0,
            length: 0,
            payload: Vec::new(),
            crc: 0,
        }
    }

    /// Drop any partial frame and hunt for the next START byte
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.payload.clear();
        self.crc = 0;
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` when the partial
    /// frame was discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_START {
                    self.state = ParseState::Type;
                }
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.crc = crc8_update(0, byte);
                self.state = ParseState::Length;
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidLength);
                }
                self.length = byte;
                self.crc = crc8_update(self.crc, byte);
                self.payload.clear();
                self.state = if byte == 0 {
                    ParseState::Crc
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Capacity is guaranteed by the length check above
                let _ = self.payload.push(byte);
                self.crc = crc8_update(self.crc, byte);
                if self.payload.len() == self.length as usize {
                    self.state = ParseState::Crc;
                }
                Ok(None)
            }
            ParseState::Crc => {
                let valid = byte == self.crc;
                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();

                if valid {
                    Ok(Some(frame))
                } else {
                    Err(FrameError::InvalidCrc)
                }
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any. Bytes after that
    /// frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crc8_check_value() {
        // Standard check value for CRC-8/SMBUS
        assert_eq!(crc8(b"123456789"), 0xF4);
    }

    #[test]
    fn test_encode_empty_payload() {
        let frame = Frame::empty(0x03);
        let mut buffer = [0u8; 8];
        let len = frame.encode(&mut buffer).unwrap();

        assert_eq!(len, 4);
        assert_eq!(&buffer[..4], &[FRAME_START, 0x03, 0x00, 0x3F]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let frame = Frame::new(0x01, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(frame.encode(&mut buffer), Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_parser_rejects_bad_crc() {
        let mut encoded = Frame::empty(0x03).encode_to_vec().unwrap();
        let last = encoded.len() - 1;
        encoded[last] ^= 0x55;

        let mut parser = FrameParser::new();
        assert_eq!(parser.feed_bytes(&encoded), Err(FrameError::InvalidCrc));
    }

    #[test]
    fn test_parser_rejects_oversized_length() {
        let mut parser = FrameParser::new();
        let result = parser.feed_bytes(&[FRAME_START, 0x01, (MAX_PAYLOAD_SIZE + 1) as u8]);
        assert_eq!(result, Err(FrameError::InvalidLength));
    }

    #[test]
    fn test_parser_resyncs_after_garbage() {
        let encoded = Frame::new(0x01, &[7, 8]).unwrap().encode_to_vec().unwrap();

        let mut data = Vec::<u8, 32>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x12]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut parser = FrameParser::new();
        let parsed = parser.feed_bytes(&data).unwrap().unwrap();
        assert_eq!(parsed.msg_type, 0x01);
        assert_eq!(&parsed.payload[..], &[7, 8]);
    }

    #[test]
    fn test_parser_recovers_after_error() {
        let mut corrupted = Frame::new(0x02, &[1]).unwrap().encode_to_vec().unwrap();
        let last = corrupted.len() - 1;
        corrupted[last] ^= 0x01;
        let good = Frame::new(0x02, &[2]).unwrap().encode_to_vec().unwrap();

        let mut parser = FrameParser::new();
        assert!(parser.feed_bytes(&corrupted).is_err());
        let parsed = parser.feed_bytes(&good).unwrap().unwrap();
        assert_eq!(&parsed.payload[..], &[2]);
    }

    #[test]
    fn test_payload_too_large() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Frame::new(0x01, &payload), Err(FrameError::PayloadTooLarge));
    }

    proptest! {
        #[test]
        fn prop_any_frame_survives_the_wire(
            msg_type in any::<u8>(),
            payload in proptest::collection::vec(any::<u8>(), 0..=MAX_PAYLOAD_SIZE),
        ) {
            let frame = Frame::new(msg_type, &payload).unwrap();
            let encoded = frame.encode_to_vec().unwrap();

            let mut parser = FrameParser::new();
            let parsed = parser.feed_bytes(&encoded).unwrap();
            prop_assert_eq!(parsed, Some(frame));
        }
    }
}
