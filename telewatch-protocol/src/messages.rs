//! Message types for the companion link
//!
//! Message types are divided into two directions:
//! - Companion → Watch: settings updates, clock set, snapshot request
//! - Watch → Companion: settings snapshot

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};
use crate::settings::Tuple;

// Message type IDs: Companion → Watch
pub const MSG_UPDATE: u8 = 0x01;
pub const MSG_SET_CLOCK: u8 = 0x02;
pub const MSG_REQUEST_SNAPSHOT: u8 = 0x03;

// Message type IDs: Watch → Companion
pub const MSG_SNAPSHOT: u8 = 0x20;

/// Maximum tuples in one dictionary
pub const MAX_TUPLES: usize = 4;

/// A set of key/value tuples, delivered or sent together
pub type Dictionary = Vec<Tuple, MAX_TUPLES>;

/// Civil time as sent by the companion
///
/// The watch derives the weekday itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub year: u16,
    /// 1-12
    pub month: u8,
    /// 1-31
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Errors decoding or encoding messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Framing failed
    Frame(FrameError),
    /// Frame carried a type this side does not accept
    UnknownType(u8),
    /// Payload did not decode
    Decode,
    /// Payload did not fit a frame
    Encode,
}

impl From<FrameError> for MessageError {
    fn from(e: FrameError) -> Self {
        MessageError::Frame(e)
    }
}

/// Messages from the companion to the watch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompanionMessage {
    /// One or more settings changed
    Update(Dictionary),
    /// Set the watch's wall clock
    SetClock(ClockTime),
    /// Ask the watch to send its current settings
    RequestSnapshot,
}

impl CompanionMessage {
    /// Parse a message from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, MessageError> {
        match frame.msg_type {
            MSG_UPDATE => decode(&frame.payload).map(CompanionMessage::Update),
            MSG_SET_CLOCK => decode(&frame.payload).map(CompanionMessage::SetClock),
            MSG_REQUEST_SNAPSHOT => Ok(CompanionMessage::RequestSnapshot),
            other => Err(MessageError::UnknownType(other)),
        }
    }

    /// Encode into a frame (used by companion tooling and tests)
    pub fn to_frame(&self) -> Result<Frame, MessageError> {
        match self {
            CompanionMessage::Update(dict) => encode(MSG_UPDATE, dict),
            CompanionMessage::SetClock(time) => encode(MSG_SET_CLOCK, time),
            CompanionMessage::RequestSnapshot => Ok(Frame::empty(MSG_REQUEST_SNAPSHOT)),
        }
    }
}

/// Messages from the watch to the companion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage {
    /// Current value of every setting
    Snapshot(Dictionary),
}

impl WatchMessage {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, MessageError> {
        match self {
            WatchMessage::Snapshot(dict) => encode(MSG_SNAPSHOT, dict),
        }
    }

    /// Parse a message from a frame (used by companion tooling and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, MessageError> {
        match frame.msg_type {
            MSG_SNAPSHOT => decode(&frame.payload).map(WatchMessage::Snapshot),
            other => Err(MessageError::UnknownType(other)),
        }
    }
}

fn encode<T: Serialize>(msg_type: u8, body: &T) -> Result<Frame, MessageError> {
    let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
    let used = postcard::to_slice(body, &mut buffer).map_err(|_| MessageError::Encode)?;
    Ok(Frame::new(msg_type, used)?)
}

fn decode<'a, T: Deserialize<'a>>(payload: &'a [u8]) -> Result<T, MessageError> {
    postcard::from_bytes(payload).map_err(|_| MessageError::Decode)
}
