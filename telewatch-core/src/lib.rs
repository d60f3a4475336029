//! Board-agnostic watchface logic
//!
//! This crate contains everything that does not depend on a specific
//! board, panel or storage medium:
//!
//! - Wall-clock time values
//! - Fixed-point hand geometry and layout tables
//! - Digital time/date formatting
//! - Settings mirror with write-through persistence
//! - Visual element set and its builder
//! - Display state machine and the render scheduler driving it
//! - Traits for the surface and tick source collaborators

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod format;
pub mod geometry;
pub mod layout;
pub mod scheduler;
pub mod settings;
pub mod state;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use time::{WallTime, Weekday};
