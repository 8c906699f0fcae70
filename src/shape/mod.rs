//! Committed shape records and the context new shapes are drawn in.
//!
//! - [`ShapeDescriptor`]: the host-facing shape record
//! - [`DrawContext`]: drag mode, reference frame and style template
//! - [`io_json`]: shape list files

mod context;
pub mod io_json;
mod model;

pub use context::{read_context, DragMode, DrawContext};
pub use model::{
    FillRule, Geometry, Layer, LineStyle, Segment, ShapeDescriptor, ShapeKind, ShapeStyle,
    ShapeValue,
};
