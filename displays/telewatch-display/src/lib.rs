//! Display stack for Telewatch
//!
//! This crate provides:
//! - `FrameBuffer`, a 144x168 1bpp `DrawTarget` that tracks which lines
//!   changed since the last flush
//! - `DisplayBackend` trait for panels that accept whole lines
//! - `Compositor`, the `telewatch_core::traits::Surface` implementation
//!   with a fixed memory budget
//! - Procedural artwork for the dial and center cap
//!
//! # Architecture
//!
//! The watchface decides what to show and marks layers dirty. The
//! compositor repaints every element into the framebuffer when anything
//! is dirty, and the framebuffer sends only the lines whose pixels
//! actually changed to the panel.

#![cfg_attr(not(test), no_std)]

pub mod artwork;
pub mod backend;
pub mod compositor;
pub mod framebuffer;
pub mod painter;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use compositor::Compositor;
pub use framebuffer::{FrameBuffer, HEIGHT, LINE_BYTES, WIDTH};
