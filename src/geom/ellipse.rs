//! Ellipse construction from drags and boxes.

use std::f64::consts::{PI, SQRT_2};

use super::bbox::CornerBox;
use super::classify::ELLIPSE_SIDES;
use super::point::{Point, Polygon};

/// Turns a drag vector into the bounding box of the ellipse it draws.
///
/// The drag starts at the ellipse centre and ends on the ellipse at 45
/// degrees. Reflecting the start through the end and taking the midpoint
/// recovers the centre; the half diagonal scaled by √2 gives the radii.
/// A drag along one axis only yields a circle passing through the drag end.
pub fn bounding_box_from_drag<S>(x0: f64, y0: f64, x1: f64, y1: f64) -> CornerBox<S> {
    let dx = x1 - x0;
    let dy = y1 - y0;

    let reflected_x = x0 - dx;
    let reflected_y = y0 - dy;
    let cx = (reflected_x + x1) / 2.0;
    let cy = (reflected_y + y1) / 2.0;

    let (rx, ry) = circle_fallback((dx * SQRT_2).abs(), (dy * SQRT_2).abs());
    let sx = if dx < 0.0 { -1.0 } else { 1.0 };
    let sy = if dy < 0.0 { -1.0 } else { 1.0 };

    CornerBox::from_corners(cx - sx * rx, cy - sy * ry, cx + sx * rx, cy + sy * ry)
}

/// Emits the 32-gon approximation of the ellipse inscribed in `bbox`.
///
/// Vertex `i` sits at angle `2π·i/32`, starting on the positive x axis.
pub fn polygon_from_box<S>(bbox: &CornerBox<S>) -> Polygon<S> {
    let center = bbox.center();
    let (rx, ry) = bbox.half_extents();
    let (rx, ry) = circle_fallback(rx, ry);

    (0..ELLIPSE_SIDES)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / ELLIPSE_SIDES as f64;
            Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

/// Returns `[start, end]` for a line drag, or the ellipse polygon for an
/// ellipse drag.
pub fn line_or_ellipse_polygon<S>(
    is_ellipse: bool,
    start: Point<S>,
    end: Point<S>,
) -> Polygon<S> {
    if !is_ellipse {
        return vec![start, end];
    }

    let bbox = bounding_box_from_drag(start.x, start.y, end.x, end.y);
    polygon_from_box(&bbox)
}

/// Rebuilds the bounding box of a polygon produced by [`polygon_from_box`].
///
/// Vertices 0 and N/2 are diametrically opposite on the x axis, so their
/// midpoint is the centre; vertex N/8 is the 45 degree point, which makes
/// (centre → vertex N/8) exactly the drag [`bounding_box_from_drag`] expects.
pub fn bounding_box_of_polygon<S>(polygon: &[Point<S>]) -> Option<CornerBox<S>> {
    let n = polygon.len();
    if n < 8 {
        return None;
    }
    let first = polygon[0];
    let opposite = polygon[(n as f64 / 2.0).round() as usize];
    let diagonal = polygon[(n as f64 / 8.0).round() as usize];

    let cx = (first.x + opposite.x) / 2.0;
    let cy = (first.y + opposite.y) / 2.0;
    Some(bounding_box_from_drag(cx, cy, diagonal.x, diagonal.y))
}

/// A zero radius makes the shape a circle sized by the other one.
fn circle_fallback(rx: f64, ry: f64) -> (f64, f64) {
    if rx == 0.0 && ry != 0.0 {
        let r = ry / SQRT_2;
        (r, r)
    } else if ry == 0.0 && rx != 0.0 {
        let r = rx / SQRT_2;
        (r, r)
    } else {
        (rx, ry)
    }
}
