//! Display surface trait
//!
//! The surface owns images, fonts and layers. Loading hands out a token
//! that must be given back to release the resource; tokens are not
//! `Clone`, so a resource is released at most once.

use embedded_graphics::prelude::Size;
use embedded_graphics::primitives::Rectangle;

/// Bundled bitmap resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageId {
    /// Full-width dial for the compact layout
    FaceLarge,
    /// Dial for the layout with digital readouts
    FaceSmall,
    CapLarge,
    CapSmall,
}

impl ImageId {
    /// Pixel dimensions of the bitmap
    pub const fn size(self) -> Size {
        match self {
            ImageId::FaceLarge => Size::new(144, 144),
            ImageId::FaceSmall => Size::new(112, 112),
            ImageId::CapLarge => Size::new(9, 9),
            ImageId::CapSmall => Size::new(7, 7),
        }
    }
}

/// Bundled fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    /// Digital time readout
    Time,
    /// Digital date readout
    Date,
}

/// Errors acquiring surface resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceError {
    /// Allocation did not fit the surface budget
    OutOfMemory,
    /// No free layer slot
    TooManyLayers,
}

/// A loaded image
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap {
    id: ImageId,
    size: Size,
}

impl Bitmap {
    pub const fn new(id: ImageId, size: Size) -> Self {
        Self { id, size }
    }

    pub const fn id(&self) -> ImageId {
        self.id
    }

    pub const fn size(&self) -> Size {
        self.size
    }
}

/// A loaded font
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Font {
    id: FontId,
}

impl Font {
    pub const fn new(id: FontId) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> FontId {
        self.id
    }
}

/// A layer attached to the surface's root
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layer {
    slot: u8,
    frame: Rectangle,
}

impl Layer {
    pub const fn new(slot: u8, frame: Rectangle) -> Self {
        Self { slot, frame }
    }

    /// Surface-assigned slot number
    pub const fn slot(&self) -> u8 {
        self.slot
    }

    /// Frame in display coordinates
    pub const fn frame(&self) -> Rectangle {
        self.frame
    }
}

/// Owner of images, fonts and layers
///
/// Layers draw in attach order.
pub trait Surface {
    fn load_image(&mut self, id: ImageId) -> Result<Bitmap, ResourceError>;
    fn release_image(&mut self, image: Bitmap);

    fn load_font(&mut self, id: FontId) -> Result<Font, ResourceError>;
    fn release_font(&mut self, font: Font);

    /// Attach a new topmost layer covering `frame`
    fn attach_layer(&mut self, frame: Rectangle) -> Result<Layer, ResourceError>;
    fn detach_layer(&mut self, layer: Layer);

    /// Request a repaint of `layer`'s contents
    fn mark_dirty(&mut self, layer: &Layer);
}
