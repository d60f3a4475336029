//! Panel driver
//!
//! The framebuffer and compositor live in `telewatch-display`; this module
//! only speaks the wire protocol of the Sharp memory LCD fitted to the
//! board.

mod ls013b7dh05;

pub use ls013b7dh05::MemoryLcd;
