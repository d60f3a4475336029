//! Display backend trait
//!
//! Defines the interface for line-addressed monochrome panels.

use crate::framebuffer::LINE_BYTES;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Line address outside the panel
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Pixels are packed MSB first, one bit per pixel, bit set for white.
pub trait DisplayBackend {
    /// Clear the entire display to black
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Write whole lines, given as (row, pixels) pairs
    ///
    /// Returns the number of lines written.
    fn write_lines<'a, I>(&mut self, lines: I) -> Result<usize, DisplayError>
    where
        I: IntoIterator<Item = (u8, &'a [u8; LINE_BYTES])>;

    /// Maintain the panel between writes
    ///
    /// Memory LCDs need their common electrode polarity inverted
    /// periodically; other panels can ignore this.
    fn refresh(&mut self) -> Result<(), DisplayError>;

    /// Turn the panel output on or off without losing its contents
    fn set_enabled(&mut self, enabled: bool) -> Result<(), DisplayError>;
}
