//! 1bpp framebuffer
//!
//! Keeps a shadow copy of what the panel currently shows, so a flush only
//! sends lines whose pixels differ. A full repaint that produces the same
//! image costs nothing on the wire.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size};

use crate::backend::{DisplayBackend, DisplayError};

/// Display width in pixels
pub const WIDTH: usize = 144;

/// Display height in pixels
pub const HEIGHT: usize = 168;

/// Bytes per display line
pub const LINE_BYTES: usize = WIDTH / 8;

type Lines = [[u8; LINE_BYTES]; HEIGHT];

/// Framebuffer for the 144x168 panel
#[derive(Clone)]
pub struct FrameBuffer {
    /// Pixels being drawn
    lines: Lines,
    /// Pixels the panel shows
    shown: Lines,
    /// Send every line on the next flush
    force: bool,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a black framebuffer
    ///
    /// The first flush sends every line since the panel contents are
    /// unknown.
    pub const fn new() -> Self {
        Self {
            lines: [[0; LINE_BYTES]; HEIGHT],
            shown: [[0; LINE_BYTES]; HEIGHT],
            force: true,
        }
    }

    /// Read one pixel
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (row, byte, mask) = locate(point)?;
        Some(BinaryColor::from(self.lines[row][byte] & mask != 0))
    }

    /// Write one pixel; out-of-bounds points are ignored
    pub fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        if let Some((row, byte, mask)) = locate(point) {
            if color.is_on() {
                self.lines[row][byte] |= mask;
            } else {
                self.lines[row][byte] &= !mask;
            }
        }
    }

    /// Packed pixels of one line
    pub fn line(&self, row: usize) -> Option<&[u8; LINE_BYTES]> {
        self.lines.get(row)
    }

    /// Rows that differ from what the panel shows
    pub fn changed_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..HEIGHT).filter(move |&row| self.force || self.lines[row] != self.shown[row])
    }

    /// Make the next flush send every line
    pub fn invalidate(&mut self) {
        self.force = true;
    }

    /// Number of white pixels
    pub fn lit_pixels(&self) -> usize {
        self.lines
            .iter()
            .flatten()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Send changed lines to `backend`
    ///
    /// Returns the number of lines written. On error the shadow copy is
    /// left untouched, so the next flush retries the same lines.
    pub fn flush<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<usize, DisplayError> {
        let lines = &self.lines;
        let written = backend.write_lines(
            self.changed_rows()
                .map(|row| (row as u8, &lines[row])),
        )?;
        self.shown = self.lines;
        self.force = false;
        Ok(written)
    }
}

// (row, byte index, bit mask) of a point, MSB is the leftmost pixel
fn locate(point: Point) -> Option<(usize, usize, u8)> {
    let x = usize::try_from(point.x).ok()?;
    let y = usize::try_from(point.y).ok()?;
    if x >= WIDTH || y >= HEIGHT {
        return None;
    }
    Some((y, x / 8, 0x80 >> (x % 8)))
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        for line in self.lines.iter_mut() {
            line.fill(fill);
        }
        Ok(())
    }
}
