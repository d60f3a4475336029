//! Companion configuration protocol
//!
//! This crate defines the serial protocol between the watch and its
//! companion (phone bridge, BLE-UART module or a desktop tool). The only
//! state the companion can change is the four boolean watchface settings,
//! plus the wall clock on boards without a battery-backed RTC.
//!
//! # Protocol Overview
//!
//! All messages use a small binary frame:
//! ```text
//! ┌───────┬──────┬────────┬─────────────┬───────┐
//! │ START │ TYPE │ LENGTH │ PAYLOAD     │ CRC-8 │
//! │ 1B    │ 1B   │ 1B     │ 0–64B       │ 1B    │
//! └───────┴──────┴────────┴─────────────┴───────┘
//! ```
//!
//! Payloads are `postcard`-encoded. Settings travel as a dictionary of
//! typed tuples keyed by small integers, the same keys used for persistent
//! storage on the watch.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod settings;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{ClockTime, CompanionMessage, Dictionary, MessageError, WatchMessage};
pub use settings::{SettingKey, Tuple, TupleValue};
