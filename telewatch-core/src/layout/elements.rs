//! Visual elements and the set that owns them

use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use crate::format::{TimeFormat, DATE_TEXT_LEN};
use crate::geometry::{HandAngles, HandPolygon, LayoutMode, SecondHandLine};
use crate::traits::{Bitmap, Font, Layer, ResourceError, Surface};

/// Number of element kinds
pub const MAX_ELEMENTS: usize = 6;

/// Element kinds in screen insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ElementKind {
    Face,
    Hands,
    SecondHand,
    CenterCap,
    Date,
    Time,
}

impl ElementKind {
    pub const SCREEN_ORDER: [ElementKind; MAX_ELEMENTS] = [
        ElementKind::Face,
        ElementKind::Hands,
        ElementKind::SecondHand,
        ElementKind::CenterCap,
        ElementKind::Date,
        ElementKind::Time,
    ];
}

/// An element that could not be instantiated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Omission {
    pub kind: ElementKind,
    pub error: ResourceError,
}

/// A bitmap shown in its own layer
#[derive(Debug)]
pub struct ImageElement {
    bitmap: Bitmap,
    layer: Layer,
}

impl ImageElement {
    pub(crate) fn new(bitmap: Bitmap, layer: Layer) -> Self {
        Self { bitmap, layer }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn frame(&self) -> Rectangle {
        self.layer.frame()
    }

    fn release<S: Surface>(self, surface: &mut S) {
        surface.detach_layer(self.layer);
        surface.release_image(self.bitmap);
    }
}

/// Hour and minute hands sharing one layer
///
/// Outlines are kept unrotated and placed again on every paint.
#[derive(Debug)]
pub struct HandsElement {
    hour: HandPolygon,
    minute: HandPolygon,
    pivot: Point,
    layer: Layer,
}

impl HandsElement {
    pub(crate) fn new(hour: HandPolygon, minute: HandPolygon, pivot: Point, layer: Layer) -> Self {
        Self {
            hour,
            minute,
            pivot,
            layer,
        }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    /// Face center in display coordinates
    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Hour hand outline at `angles`
    pub fn hour_outline(&self, angles: &HandAngles) -> [Point; 4] {
        self.hour.placed(angles.hour, self.pivot)
    }

    /// Minute hand outline at `angles`
    pub fn minute_outline(&self, angles: &HandAngles) -> [Point; 4] {
        self.minute.placed(angles.minute, self.pivot)
    }
}

/// Second hand line anchored at the face
#[derive(Debug)]
pub struct SecondHandElement {
    pivot: Point,
    radius: i32,
    layer: Layer,
}

impl SecondHandElement {
    pub(crate) fn new(pivot: Point, radius: i32, layer: Layer) -> Self {
        Self {
            pivot,
            radius,
            layer,
        }
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn line(&self, second: u8) -> SecondHandLine {
        crate::geometry::second_hand(self.pivot, self.radius, second)
    }
}

/// A digital readout with its cached string
#[derive(Debug)]
pub struct TextElement {
    font: Font,
    layer: Layer,
    text: String<DATE_TEXT_LEN>,
    valid: bool,
}

impl TextElement {
    pub(crate) fn new(font: Font, layer: Layer) -> Self {
        Self {
            font,
            layer,
            text: String::new(),
            valid: false,
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn frame(&self) -> Rectangle {
        self.layer.frame()
    }

    /// Cached text; empty until first set
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the cached text reflects a formatted value
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Replace the cached text, truncating to capacity
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for c in text.chars() {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.valid = true;
    }

    /// Force the next update to rewrite the text
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    fn release<S: Surface>(self, surface: &mut S) {
        surface.detach_layer(self.layer);
        surface.release_font(self.font);
    }
}

/// Every element built for one settings value
///
/// Absent elements were either not requested or failed to allocate; the
/// latter are listed in [`omitted`](Self::omitted).
#[derive(Debug)]
pub struct ElementSet {
    pub(crate) mode: LayoutMode,
    pub(crate) face_frame: Rectangle,
    pub(crate) time_format: TimeFormat,
    pub(crate) face: Option<ImageElement>,
    pub(crate) hands: Option<HandsElement>,
    pub(crate) second_hand: Option<SecondHandElement>,
    pub(crate) center_cap: Option<ImageElement>,
    pub(crate) date: Option<TextElement>,
    pub(crate) time: Option<TextElement>,
    pub(crate) omitted: Vec<Omission, MAX_ELEMENTS>,
}

impl ElementSet {
    pub(crate) fn empty(mode: LayoutMode, face_frame: Rectangle, time_format: TimeFormat) -> Self {
        Self {
            mode,
            face_frame,
            time_format,
            face: None,
            hands: None,
            second_hand: None,
            center_cap: None,
            date: None,
            time: None,
            omitted: Vec::new(),
        }
    }

    pub(crate) fn omit(&mut self, kind: ElementKind, error: ResourceError) {
        // One entry per kind at most, so capacity is never exceeded
        let _ = self.omitted.push(Omission { kind, error });
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Frame of the face, whether or not its image loaded
    pub fn face_frame(&self) -> Rectangle {
        self.face_frame
    }

    /// Format the time readout was built for
    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn face(&self) -> Option<&ImageElement> {
        self.face.as_ref()
    }

    pub fn hands(&self) -> Option<&HandsElement> {
        self.hands.as_ref()
    }

    pub fn second_hand(&self) -> Option<&SecondHandElement> {
        self.second_hand.as_ref()
    }

    pub fn center_cap(&self) -> Option<&ImageElement> {
        self.center_cap.as_ref()
    }

    pub fn date(&self) -> Option<&TextElement> {
        self.date.as_ref()
    }

    pub fn date_mut(&mut self) -> Option<&mut TextElement> {
        self.date.as_mut()
    }

    pub fn time(&self) -> Option<&TextElement> {
        self.time.as_ref()
    }

    pub fn time_mut(&mut self) -> Option<&mut TextElement> {
        self.time.as_mut()
    }

    pub fn omitted(&self) -> &[Omission] {
        &self.omitted
    }

    /// Layer of an element, if present
    pub fn layer(&self, kind: ElementKind) -> Option<&Layer> {
        match kind {
            ElementKind::Face => self.face.as_ref().map(ImageElement::layer),
            ElementKind::Hands => self.hands.as_ref().map(HandsElement::layer),
            ElementKind::SecondHand => self.second_hand.as_ref().map(SecondHandElement::layer),
            ElementKind::CenterCap => self.center_cap.as_ref().map(ImageElement::layer),
            ElementKind::Date => self.date.as_ref().map(TextElement::layer),
            ElementKind::Time => self.time.as_ref().map(TextElement::layer),
        }
    }

    /// Present elements and their frames, in screen order
    pub fn frames(&self) -> Vec<(ElementKind, Rectangle), MAX_ELEMENTS> {
        ElementKind::SCREEN_ORDER
            .iter()
            .filter_map(|&kind| self.layer(kind).map(|layer| (kind, layer.frame())))
            .collect()
    }

    /// Give every resource back to the surface, topmost first
    pub fn release<S: Surface>(self, surface: &mut S) {
        if let Some(time) = self.time {
            time.release(surface);
        }
        if let Some(date) = self.date {
            date.release(surface);
        }
        if let Some(cap) = self.center_cap {
            cap.release(surface);
        }
        if let Some(second_hand) = self.second_hand {
            surface.detach_layer(second_hand.layer);
        }
        if let Some(hands) = self.hands {
            surface.detach_layer(hands.layer);
        }
        if let Some(face) = self.face {
            face.release(surface);
        }
    }
}

/// Holder of the single live element set
#[derive(Debug, Default)]
pub struct ElementSlot {
    current: Option<ElementSet>,
}

impl ElementSlot {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Release the current set, then install the one `build` returns
    pub fn replace<S, F>(&mut self, surface: &mut S, build: F) -> &mut ElementSet
    where
        S: Surface,
        F: FnOnce(&mut S) -> ElementSet,
    {
        self.clear(surface);
        self.current.insert(build(surface))
    }

    /// Release the current set, if any
    pub fn clear<S: Surface>(&mut self, surface: &mut S) {
        if let Some(set) = self.current.take() {
            set.release(surface);
        }
    }

    pub fn get(&self) -> Option<&ElementSet> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut ElementSet> {
        self.current.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
