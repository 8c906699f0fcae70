//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters so that screen-space points
//! and committed data-space points cannot be mixed by accident.

use std::fmt;

/// Marker type for screen (pixel) coordinates.
///
/// Outlines are drawn and vertices are dragged in this space, with (0, 0)
/// at the top-left corner of the canvas.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for committed coordinates.
///
/// Depending on the frame this is either paper space (0.0 to 1.0 across the
/// plot area) or the data space of an axis pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Data {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
