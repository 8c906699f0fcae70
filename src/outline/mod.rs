//! Outlines of shapes being drawn.
//!
//! While a new shape is dragged out, the host shows an outline path and
//! commits it once the pointer is released. The outline depends on the drag
//! mode: boxes for rects, two points for lines, the 32-gon for ellipses, and
//! the raw pointer trail for freeform paths.

use crate::geom::ellipse::line_or_ellipse_polygon;
use crate::geom::utils::distance;
use crate::geom::{Pixel, Point, Polygon};
use crate::path::{self, DUPLICATE_POINT_THRESHOLD_PX};
use crate::shape::DragMode;

#[derive(Clone, Debug)]
pub struct OutlineBuilder {
    mode: DragMode,
    start: Point<Pixel>,
    end: Point<Pixel>,
    trail: Polygon<Pixel>,
}

impl OutlineBuilder {
    pub fn new(mode: DragMode, start: Point<Pixel>) -> Self {
        Self {
            mode,
            start,
            end: start,
            trail: vec![start],
        }
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Moves the pointer to `point`.
    ///
    /// Freeform modes keep the point unless it lies within one pixel of the
    /// last kept point.
    pub fn drag_to(&mut self, point: Point<Pixel>) {
        self.end = point;
        if matches!(self.mode, DragMode::ClosedPath | DragMode::OpenPath) {
            let far_enough = self
                .trail
                .last()
                .map_or(true, |last| distance(last, &point) >= DUPLICATE_POINT_THRESHOLD_PX);
            if far_enough {
                self.trail.push(point);
            }
        }
    }

    /// The current outline polygon.
    pub fn polygon(&self) -> Polygon<Pixel> {
        let (x0, y0) = (self.start.x, self.start.y);
        let (x1, y1) = (self.end.x, self.end.y);

        match self.mode {
            DragMode::Rect => vec![
                Point::new(x0, y0),
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
            ],
            DragMode::Line => line_or_ellipse_polygon(false, self.start, self.end),
            DragMode::Ellipse => line_or_ellipse_polygon(true, self.start, self.end),
            DragMode::ClosedPath | DragMode::OpenPath => self.trail.clone(),
        }
    }

    /// The current outline as a path string.
    pub fn path(&self) -> String {
        path::encode(&[self.polygon()], self.mode.is_open())
    }
}
