//! Geometry primitives and shape recognition.
//!
//! This module holds the space-tagged point types that every other part of
//! the crate passes around, plus the pure functions that decide what kind of
//! shape a polygon is.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: points carry a marker for their coordinate space, so
//!    a screen-space vertex cannot be written into a committed shape without
//!    going through a [`Frame`](crate::path::Frame).
//!
//! 2. **Fixed Tolerance**: all equality tests use the absolute tolerance
//!    [`utils::EPSILON`].
//!
//! 3. **Total Functions**: nothing here fails. A polygon that is not
//!    recognized simply stays a generic path.
//!
//! # Example
//!
//! ```
//! use shapedraw::geom::{classify, Pixel, Point};
//!
//! let rect: Vec<Point<Pixel>> = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.0, 10.0),
//!     Point::new(20.0, 10.0),
//!     Point::new(20.0, 0.0),
//! ];
//! assert!(classify::is_rectangle(&rect));
//! ```

mod bbox;
pub mod classify;
pub mod ellipse;
mod point;
mod space;
pub mod utils;

pub use bbox::CornerBox;
pub use point::{Axis, Point, Polygon, PolygonSet, VertexRef};
pub use space::{Data, Pixel};
