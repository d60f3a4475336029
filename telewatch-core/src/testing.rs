//! Recording test doubles for the collaborator traits

use embedded_graphics::primitives::Rectangle;

use crate::traits::{
    Bitmap, Cadence, Font, FontId, ImageId, Layer, ResourceError, Surface, TickSource,
};

/// Surface that counts every acquire and release
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub images_loaded: usize,
    pub images_released: usize,
    pub fonts_loaded: usize,
    pub fonts_released: usize,
    pub layers_attached: usize,
    pub layers_detached: usize,
    pub attach_order: Vec<u8>,
    pub detach_order: Vec<u8>,
    /// Slots marked dirty since the last `take_dirty`
    pub dirty: Vec<u8>,
    /// Maximum number of live layers
    pub layer_limit: Option<usize>,
    failing_images: Vec<ImageId>,
    failing_fonts: Vec<FontId>,
    next_slot: u8,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_image(&mut self, id: ImageId) {
        self.failing_images.push(id);
    }

    pub fn fail_font(&mut self, id: FontId) {
        self.failing_fonts.push(id);
    }

    pub fn clear_failures(&mut self) {
        self.failing_images.clear();
        self.failing_fonts.clear();
        self.layer_limit = None;
    }

    pub fn live_images(&self) -> usize {
        self.images_loaded - self.images_released
    }

    pub fn live_layers(&self) -> usize {
        self.layers_attached - self.layers_detached
    }

    pub fn take_dirty(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.dirty)
    }
}

impl Surface for RecordingSurface {
    fn load_image(&mut self, id: ImageId) -> Result<Bitmap, ResourceError> {
        if self.failing_images.contains(&id) {
            return Err(ResourceError::OutOfMemory);
        }
        self.images_loaded += 1;
        Ok(Bitmap::new(id, id.size()))
    }

    fn release_image(&mut self, _image: Bitmap) {
        self.images_released += 1;
    }

    fn load_font(&mut self, id: FontId) -> Result<Font, ResourceError> {
        if self.failing_fonts.contains(&id) {
            return Err(ResourceError::OutOfMemory);
        }
        self.fonts_loaded += 1;
        Ok(Font::new(id))
    }

    fn release_font(&mut self, _font: Font) {
        self.fonts_released += 1;
    }

    fn attach_layer(&mut self, frame: Rectangle) -> Result<Layer, ResourceError> {
        if self.layer_limit.is_some_and(|limit| self.live_layers() >= limit) {
            return Err(ResourceError::TooManyLayers);
        }
        let slot = self.next_slot;
        self.next_slot = self.next_slot.wrapping_add(1);
        self.layers_attached += 1;
        self.attach_order.push(slot);
        Ok(Layer::new(slot, frame))
    }

    fn detach_layer(&mut self, layer: Layer) {
        self.layers_detached += 1;
        self.detach_order.push(layer.slot());
    }

    fn mark_dirty(&mut self, layer: &Layer) {
        self.dirty.push(layer.slot());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickCall {
    Subscribe(Cadence),
    Unsubscribe,
}

/// Tick source that records subscription calls
#[derive(Debug, Default)]
pub struct RecordingTicks {
    pub calls: Vec<TickCall>,
}

impl RecordingTicks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_calls(&mut self) -> Vec<TickCall> {
        core::mem::take(&mut self.calls)
    }
}

impl TickSource for RecordingTicks {
    fn subscribe(&mut self, cadence: Cadence) {
        self.calls.push(TickCall::Subscribe(cadence));
    }

    fn unsubscribe(&mut self) {
        self.calls.push(TickCall::Unsubscribe);
    }
}
