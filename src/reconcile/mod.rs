//! Turning drawn outlines into shape records and merging them into the
//! host's shape list.

mod report;

pub use report::{FieldChange, ReconcileReport};

use tracing::debug;

use crate::geom::classify::{is_ellipse_polygon, is_rectangle};
use crate::geom::ellipse::bounding_box_of_polygon;
use crate::geom::{Data, Point, Polygon};
use crate::path::{self, Frame, DUPLICATE_POINT_THRESHOLD_PX};
use crate::shape::{DragMode, DrawContext, Geometry, Segment, ShapeDescriptor, ShapeValue};

/// Builds one descriptor per polygon of a screen-space path.
///
/// Near-duplicate points are dropped in pixel space before conversion, so
/// the threshold means the same thing on every axis type. Polygons left with
/// fewer than two vertices produce nothing.
pub fn build_descriptors(path: &str, ctx: &DrawContext) -> Vec<ShapeDescriptor> {
    let frame = &ctx.frame;
    let closed = !ctx.mode.is_open();

    path::decode(path)
        .iter()
        .filter_map(|polygon| {
            let mut converted: Polygon<Data> =
                path::dedupe_adjacent(polygon, DUPLICATE_POINT_THRESHOLD_PX)
                    .into_iter()
                    .map(|p| frame.to_data(p))
                    .collect();
            path::strip_closing_point(&mut converted);

            if !converted.iter().all(Point::is_finite) {
                debug!("dropping polygon with non-finite committed coordinates");
                return None;
            }
            if converted.len() < 2 {
                debug!(vertices = converted.len(), "dropping degenerate polygon");
                return None;
            }

            let geometry = classify_polygon(&converted, ctx);
            Some(ShapeDescriptor::new(
                geometry,
                frame.xref(),
                frame.yref(),
                &ctx.style,
                closed,
            ))
        })
        .collect()
}

fn classify_polygon(polygon: &[Point<Data>], ctx: &DrawContext) -> Geometry {
    let frame = &ctx.frame;

    match ctx.mode {
        DragMode::Rect if is_rectangle(polygon) => {
            return Geometry::Rect(segment(frame, polygon[0], polygon[2]));
        }
        DragMode::Line => {
            return Geometry::Line(segment(frame, polygon[0], polygon[1]));
        }
        DragMode::Ellipse if is_ellipse_polygon(polygon) => {
            if frame.has_nonlinear_axis() {
                debug!("ellipse on a log or date axis kept as a path");
            } else if let Some(bbox) = bounding_box_of_polygon(polygon) {
                return Geometry::Ellipse(segment(frame, bbox.start, bbox.end));
            }
        }
        _ => {}
    }

    let polygons = vec![polygon.to_vec()];
    let path = path::encode_with(&polygons, ctx.mode.is_open(), |p| frame.format_point(p));
    Geometry::Path { path }
}

fn segment(frame: &Frame, start: Point<Data>, end: Point<Data>) -> Segment {
    Segment {
        x0: frame.x_value(start.x),
        y0: frame.y_value(start.y),
        x1: frame.x_value(end.x),
        y1: frame.y_value(end.y),
    }
}

/// Merges freshly built descriptors into the existing shape list.
///
/// With an active shape, only the first new descriptor is considered and
/// only the fields it actually changes are written onto a copy of the
/// original record. Without one, every new descriptor is appended.
///
/// Returns `None` when the list would not change.
pub fn reconcile(
    existing: &[ShapeDescriptor],
    new: &[ShapeDescriptor],
    active: Option<usize>,
) -> Option<Vec<ShapeDescriptor>> {
    reconcile_with_report(existing, new, active).0
}

/// [`reconcile`], also returning the report behind the decision.
pub fn reconcile_with_report(
    existing: &[ShapeDescriptor],
    new: &[ShapeDescriptor],
    active: Option<usize>,
) -> (Option<Vec<ShapeDescriptor>>, ReconcileReport) {
    let Some(candidate) = new.first() else {
        return (None, ReconcileReport::default());
    };

    if let Some(index) = active {
        if let Some(original) = existing.get(index) {
            let candidate = &align_ellipse_corners(original, candidate);
            let mut report = diff_active(original, candidate);
            report.active_index = Some(index);
            if report.is_unchanged() {
                return (None, report);
            }

            let mut updated = existing.to_vec();
            updated[index] = apply_active_edit(original, candidate);
            return (Some(updated), report);
        }
        debug!(index, len = existing.len(), "active shape index out of range, appending");
    }

    let mut updated = existing.to_vec();
    updated.extend(new.iter().cloned());
    let report = ReconcileReport {
        active_index: None,
        changes: Vec::new(),
        appended: new.len(),
    };
    (Some(updated), report)
}

/// Lists the fields of `original` that `candidate` would overwrite.
///
/// Only the fields relevant to the candidate's type are compared: the
/// corners for line, rect and circle, the path string for paths. A type
/// change is reported as a `type` change followed by every field of the
/// new type.
pub fn diff_active(original: &ShapeDescriptor, candidate: &ShapeDescriptor) -> ReconcileReport {
    let mut changes = Vec::new();
    let type_changed = original.kind() != candidate.kind();
    if type_changed {
        changes.push(FieldChange::new(
            "type",
            Some(original.kind().to_string()),
            candidate.kind().to_string(),
        ));
    }

    match &candidate.geometry {
        Geometry::Path { path } => {
            let before = original.geometry.path();
            if before != Some(path.as_str()) {
                changes.push(FieldChange::new(
                    "path",
                    before.map(str::to_string),
                    path.clone(),
                ));
            }
        }
        geometry => {
            if let Some(new_segment) = geometry.segment() {
                let old_segment = original.geometry.segment();
                for (index, (field, after)) in new_segment.fields().into_iter().enumerate() {
                    let before = old_segment.map(|s| s.fields()[index].1);
                    if !before.is_some_and(|b| b.approx_eq(after)) {
                        changes.push(FieldChange::new(
                            field,
                            before.map(ToString::to_string),
                            after.to_string(),
                        ));
                    }
                }
            }
        }
    }

    ReconcileReport {
        active_index: None,
        changes,
        appended: 0,
    }
}

/// Puts the corners of a rebuilt ellipse in the order the committed one
/// uses.
///
/// A box rebuilt from the 32-gon takes its corner order from the polygon,
/// which need not match the stored record. Each axis whose corner pair
/// matches the original's in reverse is swapped back, so an unchanged
/// ellipse compares equal.
fn align_ellipse_corners(
    original: &ShapeDescriptor,
    candidate: &ShapeDescriptor,
) -> ShapeDescriptor {
    let mut aligned = candidate.clone();
    if let (Geometry::Ellipse(old), Geometry::Ellipse(new)) =
        (&original.geometry, &mut aligned.geometry)
    {
        if is_reversed_pair((&old.x0, &old.x1), (&new.x0, &new.x1)) {
            std::mem::swap(&mut new.x0, &mut new.x1);
        }
        if is_reversed_pair((&old.y0, &old.y1), (&new.y0, &new.y1)) {
            std::mem::swap(&mut new.y0, &mut new.y1);
        }
    }
    aligned
}

fn is_reversed_pair(old: (&ShapeValue, &ShapeValue), new: (&ShapeValue, &ShapeValue)) -> bool {
    let in_order = old.0.approx_eq(new.0) && old.1.approx_eq(new.1);
    !in_order && old.0.approx_eq(new.1) && old.1.approx_eq(new.0)
}

fn apply_active_edit(original: &ShapeDescriptor, candidate: &ShapeDescriptor) -> ShapeDescriptor {
    let mut updated = original.clone();

    if original.kind() != candidate.kind() {
        updated.geometry = candidate.geometry.clone();
        return updated;
    }

    match (&mut updated.geometry, &candidate.geometry) {
        (Geometry::Path { path }, Geometry::Path { path: new_path }) => {
            path.clone_from(new_path);
        }
        (geometry, new_geometry) => {
            if let (Some(old), Some(new)) = (geometry.segment_mut(), new_geometry.segment()) {
                for (field, value) in new.fields() {
                    if let Some(slot) = old.field_mut(field) {
                        if !slot.approx_eq(value) {
                            *slot = value.clone();
                        }
                    }
                }
            }
        }
    }

    updated
}
