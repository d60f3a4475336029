//! Traits for the collaborators the watchface drives
//!
//! The firmware implements these over real hardware; tests use recording
//! doubles.

mod surface;
mod tick;

pub use surface::{Bitmap, Font, FontId, ImageId, Layer, ResourceError, Surface};
pub use tick::{Cadence, TickSource};
