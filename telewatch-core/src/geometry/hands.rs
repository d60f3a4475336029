//! Hand angles and hand shapes

use embedded_graphics::prelude::Point;

use super::trig::{Angle, TRIG_MAX_RATIO};
use crate::time::WallTime;

/// Minute hand angle: `minute / 60` of a turn
pub fn minute_angle(minute: u8) -> Angle {
    Angle::from_turns((minute % 60) as i32, 60)
}

/// Hour hand angle: `((hour mod 12) * 6 + minute / 10) / 72` of a turn
///
/// The hand advances once per ten-minute bucket.
pub fn hour_angle(hour: u8, minute: u8) -> Angle {
    let steps = (hour % 12) as i32 * 6 + (minute % 60 / 10) as i32;
    Angle::from_turns(steps, 72)
}

/// Second hand angle: `second / 60` of a turn
pub fn second_angle(second: u8) -> Angle {
    Angle::from_turns((second % 60) as i32, 60)
}

/// All hand angles for one time value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandAngles {
    pub hour: Angle,
    pub minute: Angle,
    pub second: Angle,
}

impl HandAngles {
    pub fn at(time: &WallTime) -> Self {
        Self {
            hour: hour_angle(time.hour(), time.minute()),
            minute: minute_angle(time.minute()),
            second: second_angle(time.second()),
        }
    }
}

/// Rotate `point` clockwise about the origin
pub fn rotate_point(point: Point, angle: Angle) -> Point {
    let sin = angle.sin();
    let cos = angle.cos();
    let x = point.x * cos - point.y * sin;
    let y = point.x * sin + point.y * cos;
    Point::new(x / TRIG_MAX_RATIO, y / TRIG_MAX_RATIO)
}

/// Quadrilateral hand outline relative to the pivot, pointing at 12
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandPolygon {
    points: [Point; 4],
}

impl HandPolygon {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    pub const fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Distance from pivot to tip
    pub fn length(&self) -> i32 {
        self.points.iter().map(|p| -p.y).max().unwrap_or(0)
    }

    /// Outline rotated by `angle` and translated to `pivot`
    pub fn placed(&self, angle: Angle, pivot: Point) -> [Point; 4] {
        self.points.map(|p| rotate_point(p, angle) + pivot)
    }
}

/// Endpoints of the second hand line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecondHandLine {
    /// `center + r * unit`
    pub tip: Point,
    /// `center - (r / 3) * unit`
    pub tail: Point,
}

/// Second hand through `center`, `radius` long on the tip side
pub fn second_hand(center: Point, radius: i32, second: u8) -> SecondHandLine {
    let angle = second_angle(second);
    let sin = angle.sin();
    let cos = angle.cos();
    let tail_radius = radius / 3;

    SecondHandLine {
        tip: Point::new(
            center.x + radius * sin / TRIG_MAX_RATIO,
            center.y - radius * cos / TRIG_MAX_RATIO,
        ),
        tail: Point::new(
            center.x - tail_radius * sin / TRIG_MAX_RATIO,
            center.y + tail_radius * cos / TRIG_MAX_RATIO,
        ),
    }
}
