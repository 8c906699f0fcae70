//! The edit session for one active shape.
//!
//! A session owns the screen-space polygons being edited and moves through
//! `Idle → Dragging → Committing → Idle` once per gesture. The host forwards
//! its pointer callbacks here and calls [`EditSession::commit`] when the
//! session reports it is committing.

use tracing::debug;

use super::{move_vertex, on_activate_count};
use crate::geom::ellipse::polygon_from_box;
use crate::geom::{CornerBox, Data, Pixel, Point, PolygonSet, VertexRef};
use crate::path::{self, Frame};
use crate::reconcile::{build_descriptors, reconcile};
use crate::shape::{DragMode, DrawContext, Geometry, Segment, ShapeDescriptor};

/// Where a session is within the current gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    /// A vertex is being dragged; `snapshot` holds every polygon as it was
    /// when the drag started.
    Dragging {
        target: VertexRef,
        snapshot: PolygonSet<Pixel>,
    },
    /// The gesture finished and the shape list needs updating.
    Committing,
}

#[derive(Clone, Debug)]
pub struct EditSession {
    polygons: PolygonSet<Pixel>,
    context: DrawContext,
    active_index: Option<usize>,
    state: SessionState,
}

impl EditSession {
    /// Starts a session over already decoded polygons.
    ///
    /// `active_index` is the position of the edited shape in the host's
    /// list, or `None` when the polygons form a new shape.
    pub fn new(
        polygons: PolygonSet<Pixel>,
        context: DrawContext,
        active_index: Option<usize>,
    ) -> Self {
        Self {
            polygons,
            context,
            active_index,
            state: SessionState::Idle,
        }
    }

    /// Starts a session on a committed shape.
    ///
    /// The drag mode is taken from the shape type; the frame and style come
    /// from `context`. Coordinates the frame cannot read leave the session
    /// with no polygons.
    pub fn activate(shape: &ShapeDescriptor, context: DrawContext, index: usize) -> Self {
        let mode = match &shape.geometry {
            Geometry::Line(_) => DragMode::Line,
            Geometry::Rect(_) => DragMode::Rect,
            Geometry::Ellipse(_) => DragMode::Ellipse,
            Geometry::Path { .. } if shape.fillcolor.is_none() => DragMode::OpenPath,
            Geometry::Path { .. } => DragMode::ClosedPath,
        };
        let polygons = shape_polygons(&shape.geometry, &context.frame);
        Self::new(polygons, context.with_mode(mode), Some(index))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn polygons(&self) -> &PolygonSet<Pixel> {
        &self.polygons
    }

    pub fn context(&self) -> &DrawContext {
        &self.context
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    /// The live path string of the polygons being edited.
    pub fn path(&self) -> String {
        path::encode(&self.polygons, self.context.mode.is_open())
    }

    /// Begins dragging `target`. Returns false, leaving the state alone,
    /// unless the session is idle and the vertex exists.
    pub fn on_drag_start(&mut self, target: VertexRef) -> bool {
        if self.state != SessionState::Idle || target.get(&self.polygons).is_none() {
            debug!(vertex = %target, state = ?self.state, "drag start ignored");
            return false;
        }
        self.state = SessionState::Dragging {
            target,
            snapshot: self.polygons.clone(),
        };
        true
    }

    /// Moves the dragged vertex to `(dx, dy)` from its drag-start position.
    /// Returns the updated path, or `None` when no drag is in progress.
    pub fn on_drag_move(&mut self, dx: f64, dy: f64) -> Option<String> {
        let SessionState::Dragging { target, snapshot } = &self.state else {
            return None;
        };
        move_vertex(&mut self.polygons, snapshot, *target, dx, dy);
        Some(self.path())
    }

    /// Ends the drag. Returns true if a commit is now due.
    pub fn on_drag_end(&mut self) -> bool {
        if !matches!(self.state, SessionState::Dragging { .. }) {
            return false;
        }
        self.state = SessionState::Committing;
        true
    }

    /// Handles `count` quick activations of a vertex while idle.
    ///
    /// A double activation deletes the vertex when allowed; the session then
    /// waits for a commit and the new path is returned.
    pub fn on_activate_count(&mut self, target: VertexRef, count: u32) -> Option<String> {
        if self.state != SessionState::Idle {
            return None;
        }
        if !on_activate_count(&mut self.polygons, target, count) {
            return None;
        }
        self.state = SessionState::Committing;
        Some(self.path())
    }

    /// Writes the edited shape into `existing`.
    ///
    /// Returns the updated shape list, or `None` if the session was not
    /// committing or nothing changed. The session is idle afterwards.
    pub fn commit(&mut self, existing: &[ShapeDescriptor]) -> Option<Vec<ShapeDescriptor>> {
        if self.state != SessionState::Committing {
            debug!(state = ?self.state, "commit outside of a finished gesture");
            return None;
        }
        self.state = SessionState::Idle;

        let descriptors = build_descriptors(&self.path(), &self.context);
        reconcile(existing, &descriptors, self.active_index)
    }
}

/// Converts a committed geometry back into screen polygons.
fn shape_polygons(geometry: &Geometry, frame: &Frame) -> PolygonSet<Pixel> {
    match geometry {
        Geometry::Path { path } => path::strip_closing_points(frame.decode_committed(path)),
        Geometry::Line(segment) => match corners(segment, frame) {
            Some((start, end)) => vec![vec![frame.to_pixel(start), frame.to_pixel(end)]],
            None => Vec::new(),
        },
        Geometry::Rect(segment) => match corners(segment, frame) {
            Some((start, end)) => {
                let corners: [Point<Data>; 4] = [
                    Point::new(start.x, start.y),
                    Point::new(start.x, end.y),
                    Point::new(end.x, end.y),
                    Point::new(end.x, start.y),
                ];
                vec![corners.iter().map(|&p| frame.to_pixel(p)).collect()]
            }
            None => Vec::new(),
        },
        Geometry::Ellipse(segment) => match corners(segment, frame) {
            Some((start, end)) => {
                let bbox: CornerBox<Pixel> =
                    CornerBox::new(frame.to_pixel(start), frame.to_pixel(end));
                vec![polygon_from_box(&bbox)]
            }
            None => Vec::new(),
        },
    }
}

fn corners(segment: &Segment, frame: &Frame) -> Option<(Point<Data>, Point<Data>)> {
    let read = || {
        Some((
            Point::new(frame.read_x(&segment.x0)?, frame.read_y(&segment.y0)?),
            Point::new(frame.read_x(&segment.x1)?, frame.read_y(&segment.y1)?),
        ))
    };
    let found = read();
    if found.is_none() {
        debug!(?segment, "unreadable shape coordinates");
    }
    found
}
