//! Geometry provider
//!
//! Pure functions from a time value and layout mode to hand angles, hand
//! outlines and frame rectangles. No floating point.

pub mod hands;
pub mod tables;
pub mod trig;

pub use hands::{
    hour_angle, minute_angle, rotate_point, second_angle, second_hand, HandAngles, HandPolygon,
    SecondHandLine,
};
pub use tables::{
    centered_on, face_origin, time_frame, FaceGeometry, LayoutMode, DATE_FRAME, DISPLAY_HEIGHT,
    DISPLAY_WIDTH,
};
pub use trig::{cos_lookup, sin_lookup, Angle, TRIG_MAX_ANGLE, TRIG_MAX_RATIO};
