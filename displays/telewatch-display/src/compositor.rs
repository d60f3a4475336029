//! Layer compositor
//!
//! Implements the core `Surface` trait on top of a fixed memory budget and
//! paints the element set into any `BinaryColor` draw target.
//!
//! Resource costs are what a bitmap-backed implementation would hold:
//! packed 1bpp pixels for each image, the glyph atlas for each font and a
//! small fixed record per layer.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions};
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;
use telewatch_core::layout::ElementSet;
use telewatch_core::traits::{Bitmap, Font, FontId, ImageId, Layer, ResourceError, Surface};
use telewatch_core::WallTime;

use crate::painter;

/// Maximum simultaneously attached layers
pub const MAX_LAYERS: usize = 8;

/// Budget charged per attached layer
pub const LAYER_COST: usize = 16;

/// Bytes held by a loaded image
pub fn image_cost(id: ImageId) -> usize {
    let size = id.size();
    (size.width as usize).div_ceil(8) * size.height as usize
}

/// Bytes held by a loaded font
pub fn font_cost(id: FontId) -> usize {
    let size = painter::font(id).image.size();
    (size.width as usize).div_ceil(8) * size.height as usize
}

#[derive(Debug)]
struct LayerEntry {
    slot: u8,
    frame: Rectangle,
    dirty: bool,
}

/// Budgeted surface and painter
#[derive(Debug)]
pub struct Compositor {
    budget: usize,
    used: usize,
    layers: Vec<LayerEntry, MAX_LAYERS>,
    next_slot: u8,
    needs_paint: bool,
}

impl Compositor {
    /// Create a compositor that may hold `budget` bytes of resources
    pub const fn new(budget: usize) -> Self {
        Self {
            budget,
            used: 0,
            layers: Vec::new(),
            next_slot: 0,
            needs_paint: true,
        }
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Bytes currently held
    pub fn used(&self) -> usize {
        self.used
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Check if the next compose will repaint
    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    /// Frames of layers marked dirty since the last compose
    pub fn dirty_frames(&self) -> impl Iterator<Item = Rectangle> + '_ {
        self.layers.iter().filter(|l| l.dirty).map(|l| l.frame)
    }

    /// Force a repaint on the next compose
    pub fn invalidate(&mut self) {
        self.needs_paint = true;
    }

    /// Repaint everything if any layer changed
    ///
    /// Clears `target` to black and paints `elements` at `now`. Passing
    /// `None` for either leaves the target blank. Returns whether anything
    /// was painted.
    pub fn compose<D>(
        &mut self,
        elements: Option<&ElementSet>,
        now: Option<&WallTime>,
        target: &mut D,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if !self.needs_paint {
            return Ok(false);
        }

        target.clear(BinaryColor::Off)?;
        if let (Some(elements), Some(now)) = (elements, now) {
            painter::paint(elements, now, target)?;
        }

        for layer in self.layers.iter_mut() {
            layer.dirty = false;
        }
        self.needs_paint = false;
        Ok(true)
    }

    fn reserve(&mut self, cost: usize) -> Result<(), ResourceError> {
        let used = self.used + cost;
        if used > self.budget {
            return Err(ResourceError::OutOfMemory);
        }
        self.used = used;
        Ok(())
    }

    fn free(&mut self, cost: usize) {
        self.used = self.used.saturating_sub(cost);
    }
}

impl Surface for Compositor {
    fn load_image(&mut self, id: ImageId) -> Result<Bitmap, ResourceError> {
        self.reserve(image_cost(id))?;
        Ok(Bitmap::new(id, id.size()))
    }

    fn release_image(&mut self, image: Bitmap) {
        self.free(image_cost(image.id()));
    }

    fn load_font(&mut self, id: FontId) -> Result<Font, ResourceError> {
        self.reserve(font_cost(id))?;
        Ok(Font::new(id))
    }

    fn release_font(&mut self, font: Font) {
        self.free(font_cost(font.id()));
    }

    fn attach_layer(&mut self, frame: Rectangle) -> Result<Layer, ResourceError> {
        if self.layers.is_full() {
            return Err(ResourceError::TooManyLayers);
        }
        self.reserve(LAYER_COST)?;

        let slot = self.next_slot;
        self.next_slot = self.next_slot.wrapping_add(1);
        // Capacity checked above
        let _ = self.layers.push(LayerEntry {
            slot,
            frame,
            dirty: true,
        });
        self.needs_paint = true;
        Ok(Layer::new(slot, frame))
    }

    fn detach_layer(&mut self, layer: Layer) {
        if let Some(index) = self.layers.iter().position(|l| l.slot == layer.slot()) {
            self.layers.remove(index);
            self.free(LAYER_COST);
            self.needs_paint = true;
        }
    }

    fn mark_dirty(&mut self, layer: &Layer) {
        if let Some(entry) = self.layers.iter_mut().find(|l| l.slot == layer.slot()) {
            entry.dirty = true;
            self.needs_paint = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use embedded_graphics::prelude::Point;
    use embedded_graphics::primitives::PointsIter;
    use telewatch_core::layout::ElementKind;
    use telewatch_core::scheduler::Watchface;
    use telewatch_core::settings::{SettingKey, SettingsStore};
    use telewatch_core::traits::{Cadence, TickSource};
    use telewatch_hal::RamStorage;

    struct NoTicks;

    impl TickSource for NoTicks {
        fn subscribe(&mut self, _cadence: Cadence) {}
        fn unsubscribe(&mut self) {}
    }

    fn watchface() -> Watchface<RamStorage> {
        Watchface::new(SettingsStore::load(RamStorage::new(), true))
    }

    fn at(hour: u8, minute: u8, second: u8) -> WallTime {
        WallTime::new(2024, 3, 7, hour, minute, second).unwrap()
    }

    fn full_normal_budget() -> usize {
        image_cost(ImageId::FaceSmall)
            + image_cost(ImageId::CapSmall)
            + font_cost(FontId::Date)
            + font_cost(FontId::Time)
            + 5 * LAYER_COST
    }

    #[test]
    fn test_image_costs() {
        assert_eq!(image_cost(ImageId::FaceLarge), 18 * 144);
        assert_eq!(image_cost(ImageId::FaceSmall), 14 * 112);
        assert_eq!(image_cost(ImageId::CapLarge), 2 * 9);
    }

    #[test]
    fn test_budget_enforced_and_released() {
        let mut compositor = Compositor::new(image_cost(ImageId::FaceSmall));
        let face = compositor.load_image(ImageId::FaceSmall).unwrap();
        assert_eq!(
            compositor.load_image(ImageId::CapSmall),
            Err(ResourceError::OutOfMemory)
        );

        compositor.release_image(face);
        assert_eq!(compositor.used(), 0);
        assert!(compositor.load_image(ImageId::CapSmall).is_ok());
    }

    #[test]
    fn test_layer_limit() {
        let mut compositor = Compositor::new(usize::MAX / 2);
        let frame = Rectangle::new(Point::zero(), ImageId::CapSmall.size());
        for _ in 0..MAX_LAYERS {
            compositor.attach_layer(frame).unwrap();
        }
        assert_eq!(
            compositor.attach_layer(frame),
            Err(ResourceError::TooManyLayers)
        );
    }

    #[test]
    fn test_full_layout_fits_exact_budget() {
        let mut compositor = Compositor::new(full_normal_budget());
        let mut face = watchface();
        let report = face.window_shown(at(10, 10, 0), &mut NoTicks, &mut compositor);

        assert!(report.omitted.is_empty());
        assert_eq!(compositor.used(), compositor.budget());
        assert_eq!(compositor.layer_count(), 5);
    }

    #[test]
    fn test_tight_budget_omits_time_readout() {
        let budget = full_normal_budget() - font_cost(FontId::Time);
        let mut compositor = Compositor::new(budget);
        let mut face = watchface();
        let report = face.window_shown(at(10, 10, 0), &mut NoTicks, &mut compositor);

        assert_eq!(report.omitted.len(), 1);
        assert_eq!(report.omitted[0].kind, ElementKind::Time);
        assert_eq!(report.omitted[0].error, ResourceError::OutOfMemory);
        assert!(face.elements().unwrap().date().is_some());
    }

    #[test]
    fn test_hide_returns_all_memory() {
        let mut compositor = Compositor::new(64 * 1024);
        let mut face = watchface();
        face.window_shown(at(10, 10, 0), &mut NoTicks, &mut compositor);
        face.apply_setting(SettingKey::ShowSeconds, true, &mut NoTicks);
        face.tick(at(10, 10, 1), &mut compositor);
        face.window_hidden(&mut NoTicks, &mut compositor);

        assert_eq!(compositor.used(), 0);
        assert_eq!(compositor.layer_count(), 0);
    }

    #[test]
    fn test_compose_only_when_dirty() {
        let mut compositor = Compositor::new(64 * 1024);
        let mut fb = FrameBuffer::new();
        let mut face = watchface();
        face.window_shown(at(12, 0, 0), &mut NoTicks, &mut compositor);

        assert!(compositor
            .compose(face.elements(), face.now(), &mut fb)
            .unwrap());
        assert!(!compositor.needs_paint());
        assert!(!compositor
            .compose(face.elements(), face.now(), &mut fb)
            .unwrap());

        face.tick(at(12, 1, 0), &mut compositor);
        assert!(compositor.dirty_frames().count() > 0);
        assert!(compositor
            .compose(face.elements(), face.now(), &mut fb)
            .unwrap());
        assert_eq!(compositor.dirty_frames().count(), 0);
    }

    #[test]
    fn test_hands_painted_at_noon() {
        let mut compositor = Compositor::new(64 * 1024);
        let mut fb = FrameBuffer::new();
        let mut face = watchface();
        face.apply_setting(SettingKey::ShowTime, false, &mut NoTicks);
        face.apply_setting(SettingKey::ShowDate, false, &mut NoTicks);
        face.window_shown(at(12, 0, 0), &mut NoTicks, &mut compositor);
        compositor
            .compose(face.elements(), face.now(), &mut fb)
            .unwrap();

        // Compact face centered at (72, 84); both hands point straight up
        assert_eq!(fb.pixel(Point::new(72, 50)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(100, 84)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(72, 110)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_text_painted_in_frame() {
        let mut compositor = Compositor::new(64 * 1024);
        let mut fb = FrameBuffer::new();
        let mut face = watchface();
        face.window_shown(at(13, 5, 9), &mut NoTicks, &mut compositor);
        compositor
            .compose(face.elements(), face.now(), &mut fb)
            .unwrap();

        let lit_in = |frame: Rectangle| {
            frame
                .points()
                .filter(|&p| fb.pixel(p) == Some(BinaryColor::On))
                .count()
        };
        let time = face.elements().unwrap().time().unwrap().frame();
        let date = face.elements().unwrap().date().unwrap().frame();
        assert!(lit_in(time) > 0);
        assert!(lit_in(date) > 0);
    }

    #[test]
    fn test_compose_without_elements_blanks() {
        let mut compositor = Compositor::new(1024);
        let mut fb = FrameBuffer::new();
        fb.set_pixel(Point::new(1, 1), BinaryColor::On);
        assert!(compositor.compose(None, None, &mut fb).unwrap());
        assert_eq!(fb.lit_pixels(), 0);
    }
}
