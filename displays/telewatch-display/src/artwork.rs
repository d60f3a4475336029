//! Procedural artwork
//!
//! The dial and center cap are drawn from geometry rather than stored as
//! bitmaps. Both are white on black.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, Point, Primitive, Size};
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::Drawable;
use telewatch_core::geometry::{rotate_point, Angle};
use telewatch_core::traits::ImageId;

use crate::painter::fill_quad;

/// Draw image `id` with its top-left corner at `origin`
pub fn draw_image<D>(id: ImageId, origin: Point, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    match id {
        ImageId::FaceLarge | ImageId::FaceSmall => draw_dial(origin, id.size(), target),
        ImageId::CapLarge | ImageId::CapSmall => draw_cap(origin, id.size(), target),
    }
}

/// Sixty minute ticks with heavier hour batons
fn draw_dial<D>(origin: Point, size: Size, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let radius = size.width as i32 / 2;
    let center = origin + Point::new(radius, radius);
    let outer = radius - 1;
    let baton = radius / 6;
    let tick_style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    for minute in 0..60 {
        let angle = Angle::from_turns(minute, 60);

        if minute % 5 == 0 {
            // Twelve o'clock gets a double-width baton
            let half = if minute == 0 { 3 } else { 2 };
            let outline = [
                Point::new(-half, -outer),
                Point::new(half, -outer),
                Point::new(half, -(outer - baton)),
                Point::new(-half, -(outer - baton)),
            ];
            fill_quad(
                &outline.map(|p| rotate_point(p, angle) + center),
                BinaryColor::On,
                target,
            )?;
        } else {
            let start = rotate_point(Point::new(0, -outer), angle) + center;
            let end = rotate_point(Point::new(0, -(outer - 3)), angle) + center;
            Line::new(start, end).into_styled(tick_style).draw(target)?;
        }
    }

    Ok(())
}

/// Filled disc with a black pin hole
fn draw_cap<D>(origin: Point, size: Size, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Circle::new(origin, size.width)
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(target)?;

    let center = origin + Point::new(size.width as i32 / 2, size.height as i32 / 2);
    target.draw_iter(core::iter::once(embedded_graphics::Pixel(
        center,
        BinaryColor::Off,
    )))
}
