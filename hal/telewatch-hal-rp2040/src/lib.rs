//! RP2040-specific HAL for the watch firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `telewatch-hal` traits, plus the on-chip real-time clock:
//!
//! - Flash settings storage (implements `telewatch_hal::SettingsStorage`)
//! - RTC wrapper speaking `telewatch_core::WallTime`

#![no_std]

pub mod flash;
pub mod rtc;

pub use flash::Rp2040SettingsFlash;
pub use rtc::{ClockError, RtcClock};

// Re-export shared traits from telewatch-hal for convenience
pub use telewatch_hal::{SettingsStorage, StorageError, StorageKey};
