//! Telewatch Hardware Abstraction Layer
//!
//! This crate defines the hardware seams the watchface logic runs against,
//! so the same core can be driven by the RP2040 board, a desktop simulator
//! or host-side tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  telewatch-core / telewatch-firmware    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  telewatch-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ telewatch-hal-│       │  RamStorage   │
//! │    rp2040     │       │  (host/tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::SettingsStorage`] - Persistent integer key/value storage

#![no_std]
#![deny(unsafe_code)]

pub mod storage;

// Re-export key traits at crate root for convenience
pub use storage::{RamStorage, SettingsStorage, StorageError, StorageKey};
