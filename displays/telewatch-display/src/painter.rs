//! Painting an element set
//!
//! Everything is white on a black background. Hands are filled outlines
//! without a stroke; the minute hand is drawn under the hour hand.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point, Primitive};
use embedded_graphics::primitives::{Line, PrimitiveStyle, Triangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use telewatch_core::geometry::HandAngles;
use telewatch_core::layout::{ElementSet, TextElement};
use telewatch_core::traits::FontId;
use telewatch_core::WallTime;

use crate::artwork;

/// Font backing a [`FontId`]
pub fn font(id: FontId) -> &'static MonoFont<'static> {
    match id {
        FontId::Time => &FONT_10X20,
        FontId::Date => &FONT_9X15,
    }
}

/// Fill a convex quadrilateral
pub fn fill_quad<D>(points: &[Point; 4], color: BinaryColor, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = PrimitiveStyle::with_fill(color);
    Triangle::new(points[0], points[1], points[2])
        .into_styled(style)
        .draw(target)?;
    Triangle::new(points[0], points[2], points[3])
        .into_styled(style)
        .draw(target)
}

/// Draw every present element at `now`, in screen order
pub fn paint<D>(elements: &ElementSet, now: &WallTime, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if let Some(face) = elements.face() {
        artwork::draw_image(face.bitmap().id(), face.frame().top_left, target)?;
    }

    if let Some(hands) = elements.hands() {
        let angles = HandAngles::at(now);
        fill_quad(&hands.minute_outline(&angles), BinaryColor::On, target)?;
        fill_quad(&hands.hour_outline(&angles), BinaryColor::On, target)?;
    }

    if let Some(second_hand) = elements.second_hand() {
        let line = second_hand.line(now.second());
        Line::new(line.tip, line.tail)
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(target)?;
    }

    if let Some(cap) = elements.center_cap() {
        artwork::draw_image(cap.bitmap().id(), cap.frame().top_left, target)?;
    }

    if let Some(date) = elements.date() {
        draw_text(date, target)?;
    }

    if let Some(time) = elements.time() {
        draw_text(time, target)?;
    }

    Ok(())
}

fn draw_text<D>(element: &TextElement, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    if !element.is_valid() {
        return Ok(());
    }
    let style = MonoTextStyle::new(font(element.font().id()), BinaryColor::On);
    Text::with_baseline(element.text(), element.frame().top_left, style, Baseline::Top)
        .draw(target)?;
    Ok(())
}
