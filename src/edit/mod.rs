//! Vertex editing of an active shape.
//!
//! All edits work on screen-space polygons. A move is always computed from
//! the snapshot taken when the drag started, never incrementally, so a drag
//! that wanders off and comes back restores the original vertices exactly.

pub mod session;

pub use session::{EditSession, SessionState};

use tracing::debug;

use crate::geom::classify::is_rectangle;
use crate::geom::utils::approx_equal;
use crate::geom::{Pixel, Point, Polygon, PolygonSet, VertexRef};

/// Moves one vertex by `(dx, dy)` relative to its position in `snapshot`.
///
/// If the polygon was a rectangle at drag start, every vertex sharing the
/// dragged vertex's x moves along x and every vertex sharing its y moves
/// along y, so the shape stays a rectangle. Should the result stop being a
/// rectangle (e.g. collapsed to zero width), the whole polygon is restored
/// from the snapshot. Other polygons just have the one vertex translated.
///
/// Which of the two applies is decided from the snapshot, not from the
/// current polygon, so it stays fixed for the whole gesture: a polygon that
/// only becomes a rectangle mid-drag keeps moving one vertex at a time.
pub fn move_vertex(
    set: &mut PolygonSet<Pixel>,
    snapshot: &PolygonSet<Pixel>,
    target: VertexRef,
    dx: f64,
    dy: f64,
) {
    let Some(baseline) = snapshot.get(target.polygon) else {
        debug!(vertex = %target, "move target polygon not in snapshot");
        return;
    };
    let Some(&anchor) = baseline.get(target.vertex) else {
        debug!(vertex = %target, "move target vertex not in snapshot");
        return;
    };
    let Some(polygon) = set.get_mut(target.polygon) else {
        return;
    };

    if !is_rectangle(baseline) {
        if let Some(vertex) = polygon.get_mut(target.vertex) {
            *vertex = anchor.offset(dx, dy);
        }
        return;
    }

    let moved: Polygon<Pixel> = baseline
        .iter()
        .map(|p| {
            let x = if approx_equal(p.x, anchor.x) { p.x + dx } else { p.x };
            let y = if approx_equal(p.y, anchor.y) { p.y + dy } else { p.y };
            Point::new(x, y)
        })
        .collect();

    if is_rectangle(&moved) {
        *polygon = moved;
    } else {
        debug!(vertex = %target, dx, dy, "rectangle move would break the shape, rolling back");
        polygon.clone_from(baseline);
    }
}

/// Removes one vertex. Returns whether anything was removed.
///
/// Refused when the polygon would drop below two vertices or is a
/// rectangle. Out-of-range targets are a no-op.
pub fn delete_vertex(set: &mut PolygonSet<Pixel>, target: VertexRef) -> bool {
    let Some(polygon) = set.get_mut(target.polygon) else {
        return false;
    };
    if target.vertex >= polygon.len() {
        return false;
    }
    if polygon.len() <= 2 || is_rectangle(polygon) {
        debug!(vertex = %target, len = polygon.len(), "vertex deletion refused");
        return false;
    }

    polygon.remove(target.vertex);
    true
}

/// Interprets repeated activation of a vertex. A double activation deletes
/// it; any other count does nothing.
pub fn on_activate_count(set: &mut PolygonSet<Pixel>, target: VertexRef, count: u32) -> bool {
    count == 2 && delete_vertex(set, target)
}
