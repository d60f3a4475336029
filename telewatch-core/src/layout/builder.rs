//! Building an element set from settings

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use super::elements::{
    ElementKind, ElementSet, ElementSlot, HandsElement, ImageElement, SecondHandElement,
    TextElement,
};
use crate::geometry::{centered_on, face_origin, time_frame, FaceGeometry, DATE_FRAME};
use crate::settings::Settings;
use crate::traits::{FontId, ImageId, ResourceError, Surface};

/// Owner of the live element set
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    slot: ElementSlot,
}

impl LayoutBuilder {
    pub const fn new() -> Self {
        Self {
            slot: ElementSlot::new(),
        }
    }

    /// Release the current set and build a fresh one for `settings`
    pub fn rebuild<S: Surface>(&mut self, settings: &Settings, surface: &mut S) -> &mut ElementSet {
        self.slot.replace(surface, |surface| build(settings, surface))
    }

    /// Release the current set, if any
    pub fn teardown<S: Surface>(&mut self, surface: &mut S) {
        self.slot.clear(surface);
    }

    pub fn elements(&self) -> Option<&ElementSet> {
        self.slot.get()
    }

    pub fn elements_mut(&mut self) -> Option<&mut ElementSet> {
        self.slot.get_mut()
    }
}

/// Instantiate every element `settings` asks for, in screen order
///
/// Elements whose resources cannot be allocated are left out and listed
/// as omitted.
pub fn build<S: Surface>(settings: &Settings, surface: &mut S) -> ElementSet {
    let mode = settings.layout_mode();
    let geometry = FaceGeometry::for_mode(mode);
    let origin = face_origin(mode, settings.show_digital_time);
    let nominal_face = Rectangle::new(origin, geometry.face_image.size());

    let mut set = ElementSet::empty(mode, nominal_face, settings.time_format());

    match load_image(surface, geometry.face_image, |size| Rectangle::new(origin, size)) {
        Ok(face) => {
            set.face_frame = face.frame();
            set.face = Some(face);
        }
        Err(e) => set.omit(ElementKind::Face, e),
    }

    let face_frame = set.face_frame;
    let pivot = face_frame.top_left
        + Point::new(
            face_frame.size.width as i32 / 2,
            face_frame.size.height as i32 / 2,
        );

    match surface.attach_layer(face_frame) {
        Ok(layer) => {
            set.hands = Some(HandsElement::new(
                geometry.hour_hand,
                geometry.minute_hand,
                pivot,
                layer,
            ))
        }
        Err(e) => set.omit(ElementKind::Hands, e),
    }

    if settings.show_seconds {
        let radius = face_frame.size.width as i32 / 2;
        match surface.attach_layer(face_frame) {
            Ok(layer) => set.second_hand = Some(SecondHandElement::new(pivot, radius, layer)),
            Err(e) => set.omit(ElementKind::SecondHand, e),
        }
    }

    match load_image(surface, geometry.cap_image, |size| centered_on(pivot, size)) {
        Ok(cap) => set.center_cap = Some(cap),
        Err(e) => set.omit(ElementKind::CenterCap, e),
    }

    if settings.show_digital_date {
        match load_text(surface, FontId::Date, DATE_FRAME) {
            Ok(date) => set.date = Some(date),
            Err(e) => set.omit(ElementKind::Date, e),
        }
    }

    if settings.show_digital_time {
        match load_text(surface, FontId::Time, time_frame(settings.show_seconds)) {
            Ok(time) => set.time = Some(time),
            Err(e) => set.omit(ElementKind::Time, e),
        }
    }

    set
}

fn load_image<S, F>(surface: &mut S, id: ImageId, frame: F) -> Result<ImageElement, ResourceError>
where
    S: Surface,
    F: FnOnce(Size) -> Rectangle,
{
    let bitmap = surface.load_image(id)?;
    match surface.attach_layer(frame(bitmap.size())) {
        Ok(layer) => Ok(ImageElement::new(bitmap, layer)),
        Err(e) => {
            surface.release_image(bitmap);
            Err(e)
        }
    }
}

fn load_text<S: Surface>(
    surface: &mut S,
    id: FontId,
    frame: Rectangle,
) -> Result<TextElement, ResourceError> {
    let font = surface.load_font(id)?;
    match surface.attach_layer(frame) {
        Ok(layer) => Ok(TextElement::new(font, layer)),
        Err(e) => {
            surface.release_font(font);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::LayoutMode;
    use crate::layout::Omission;
    use crate::testing::RecordingSurface;

    fn settings(seconds: bool, time: bool, date: bool) -> Settings {
        Settings {
            show_seconds: seconds,
            show_digital_time: time,
            show_digital_date: date,
            use_24h_format: true,
        }
    }

    #[test]
    fn test_normal_layout_frames() {
        let mut surface = RecordingSurface::new();
        let set = build(&settings(true, true, true), &mut surface);

        assert_eq!(set.mode(), LayoutMode::Normal);
        assert!(set.omitted().is_empty());

        let frames = set.frames();
        let kinds: Vec<_> = frames.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, ElementKind::SCREEN_ORDER.to_vec());

        let face = Rectangle::new(Point::new(16, 0), Size::new(112, 112));
        assert_eq!(frames[0].1, face);
        assert_eq!(frames[1].1, face);
        assert_eq!(frames[2].1, face);
        assert_eq!(frames[3].1, Rectangle::new(Point::new(69, 53), Size::new(7, 7)));
        assert_eq!(frames[4].1, DATE_FRAME);
        assert_eq!(frames[5].1, Rectangle::new(Point::new(25, 112), Size::new(119, 33)));

        assert_eq!(set.hands().unwrap().pivot(), Point::new(72, 56));
        assert_eq!(set.second_hand().unwrap().radius(), 56);
    }

    #[test]
    fn test_compact_layout() {
        let mut surface = RecordingSurface::new();
        let set = build(&settings(false, false, false), &mut surface);

        assert_eq!(set.mode(), LayoutMode::Compact);
        assert_eq!(
            set.face_frame(),
            Rectangle::new(Point::new(0, 12), Size::new(144, 144))
        );
        assert!(set.second_hand().is_none());
        assert!(set.date().is_none());
        assert!(set.time().is_none());
        assert_eq!(set.hands().unwrap().pivot(), Point::new(72, 84));
        assert_eq!(set.center_cap().unwrap().bitmap().id(), ImageId::CapLarge);
    }

    #[test]
    fn test_date_only_layout() {
        let mut surface = RecordingSurface::new();
        let set = build(&settings(false, false, true), &mut surface);

        assert_eq!(set.face_frame().top_left, Point::new(16, 14));
        assert!(set.time().is_none());
        assert!(!set.date().unwrap().is_valid());
    }

    #[test]
    fn test_time_frame_without_seconds() {
        let mut surface = RecordingSurface::new();
        let set = build(&settings(false, true, false), &mut surface);
        assert_eq!(
            set.time().unwrap().frame(),
            Rectangle::new(Point::new(43, 112), Size::new(101, 33))
        );
    }

    #[test]
    fn test_rebuild_is_stable_and_balanced() {
        let mut surface = RecordingSurface::new();
        let mut builder = LayoutBuilder::new();
        let s = settings(true, true, true);

        let first = builder.rebuild(&s, &mut surface).frames();
        let second = builder.rebuild(&s, &mut surface).frames();
        assert_eq!(first, second);

        builder.teardown(&mut surface);
        assert!(builder.elements().is_none());
        assert_eq!(surface.images_loaded, surface.images_released);
        assert_eq!(surface.fonts_loaded, surface.fonts_released);
        assert_eq!(surface.layers_attached, surface.layers_detached);
        assert_eq!(surface.images_loaded, 4);
    }

    #[test]
    fn test_release_is_reverse_insertion_order() {
        let mut surface = RecordingSurface::new();
        let set = build(&settings(true, true, true), &mut surface);
        let attached = surface.attach_order.clone();

        set.release(&mut surface);
        let mut detached = surface.detach_order.clone();
        detached.reverse();
        assert_eq!(detached, attached);
    }

    #[test]
    fn test_failed_font_is_omitted() {
        let mut surface = RecordingSurface::new();
        surface.fail_font(FontId::Time);

        let set = build(&settings(false, true, true), &mut surface);
        assert!(set.time().is_none());
        assert!(set.date().is_some());
        assert_eq!(
            set.omitted(),
            &[Omission {
                kind: ElementKind::Time,
                error: ResourceError::OutOfMemory
            }]
        );
    }

    #[test]
    fn test_failed_face_keeps_hands_centered() {
        let mut surface = RecordingSurface::new();
        surface.fail_image(ImageId::FaceSmall);

        let set = build(&settings(false, true, true), &mut surface);
        assert!(set.face().is_none());
        assert_eq!(set.hands().unwrap().pivot(), Point::new(72, 56));
        assert_eq!(set.omitted()[0].kind, ElementKind::Face);
    }

    #[test]
    fn test_layer_failure_releases_resource() {
        let mut surface = RecordingSurface::new();
        surface.layer_limit = Some(1);

        let set = build(&settings(false, true, true), &mut surface);
        assert!(set.face().is_some());
        assert_eq!(set.omitted().len(), 4);
        // Cap image and both fonts were handed back after their layers failed
        assert_eq!(surface.live_images(), 1);
        assert_eq!(surface.fonts_loaded, surface.fonts_released);

        set.release(&mut surface);
        assert_eq!(surface.live_layers(), 0);
    }

    #[test]
    fn test_omitted_elements_return_on_rebuild() {
        let mut surface = RecordingSurface::new();
        surface.fail_font(FontId::Date);
        let mut builder = LayoutBuilder::new();
        let s = settings(false, true, true);

        assert!(builder.rebuild(&s, &mut surface).date().is_none());

        surface.clear_failures();
        let set = builder.rebuild(&s, &mut surface);
        assert!(set.date().is_some());
        assert!(set.omitted().is_empty());
    }
}
