//! Fixed layout tables for the 144x168 display

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use super::hands::HandPolygon;
use crate::traits::ImageId;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 144;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 168;

/// Which geometry table is active
///
/// Compact when no digital readout is shown; the face then fills the
/// display width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutMode {
    Compact,
    Normal,
}

impl LayoutMode {
    pub const fn from_readouts(show_time: bool, show_date: bool) -> Self {
        if show_time || show_date {
            LayoutMode::Normal
        } else {
            LayoutMode::Compact
        }
    }

    pub const fn is_compact(self) -> bool {
        matches!(self, LayoutMode::Compact)
    }
}

/// Face and hand dimensions for one layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGeometry {
    pub face_image: ImageId,
    pub cap_image: ImageId,
    pub hour_hand: HandPolygon,
    pub minute_hand: HandPolygon,
}

pub const COMPACT_GEOMETRY: FaceGeometry = FaceGeometry {
    face_image: ImageId::FaceLarge,
    cap_image: ImageId::CapLarge,
    hour_hand: HandPolygon::new([
        Point::new(-4, -49),
        Point::new(4, -49),
        Point::new(4, 0),
        Point::new(-4, 0),
    ]),
    minute_hand: HandPolygon::new([
        Point::new(-3, -72),
        Point::new(3, -72),
        Point::new(3, 0),
        Point::new(-3, 0),
    ]),
};

pub const NORMAL_GEOMETRY: FaceGeometry = FaceGeometry {
    face_image: ImageId::FaceSmall,
    cap_image: ImageId::CapSmall,
    hour_hand: HandPolygon::new([
        Point::new(-3, -37),
        Point::new(4, -37),
        Point::new(4, 0),
        Point::new(-3, 0),
    ]),
    minute_hand: HandPolygon::new([
        Point::new(-2, -56),
        Point::new(3, -56),
        Point::new(3, 0),
        Point::new(-2, 0),
    ]),
};

impl FaceGeometry {
    pub const fn for_mode(mode: LayoutMode) -> &'static FaceGeometry {
        match mode {
            LayoutMode::Compact => &COMPACT_GEOMETRY,
            LayoutMode::Normal => &NORMAL_GEOMETRY,
        }
    }
}

/// Top-left corner of the face image
pub const fn face_origin(mode: LayoutMode, show_time: bool) -> Point {
    match mode {
        LayoutMode::Compact => Point::new(0, 12),
        LayoutMode::Normal if show_time => Point::new(16, 0),
        LayoutMode::Normal => Point::new(16, 14),
    }
}

/// Frame of the date readout
pub const DATE_FRAME: Rectangle = Rectangle::new(Point::new(13, 146), Size::new(131, 20));

/// Frame of the time readout when it carries seconds
pub const TIME_FRAME_WITH_SECONDS: Rectangle =
    Rectangle::new(Point::new(25, 112), Size::new(119, 33));

/// Frame of the time readout without seconds
pub const TIME_FRAME: Rectangle = Rectangle::new(Point::new(43, 112), Size::new(101, 33));

pub const fn time_frame(show_seconds: bool) -> Rectangle {
    if show_seconds {
        TIME_FRAME_WITH_SECONDS
    } else {
        TIME_FRAME
    }
}

/// Rectangle of `size` whose center sits on `center`
pub fn centered_on(center: Point, size: Size) -> Rectangle {
    let top_left = center - Point::new(size.width as i32 / 2, size.height as i32 / 2);
    Rectangle::new(top_left, size)
}
