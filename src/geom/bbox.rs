//! Two-corner boxes, the geometry shared by line, rect and ellipse shapes.

use serde::{Deserialize, Serialize};

use super::point::Point;

/// A box given by two opposite corners `(x0, y0)` and `(x1, y1)`.
///
/// The corners are not reordered: a box dragged from bottom-right to top-left
/// keeps `x0 > x1`. Width and height may therefore be negative.
pub struct CornerBox<TSpace> {
    pub start: Point<TSpace>,
    pub end: Point<TSpace>,
}

impl<TSpace> Clone for CornerBox<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for CornerBox<TSpace> {}

impl<TSpace> PartialEq for CornerBox<TSpace> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<TSpace> CornerBox<TSpace> {
    /// Creates a new box from two corner points.
    #[inline]
    pub fn new(start: Point<TSpace>, end: Point<TSpace>) -> Self {
        Self { start, end }
    }

    /// Creates a new box from explicit coordinates.
    #[inline]
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            start: Point::new(x0, y0),
            end: Point::new(x1, y1),
        }
    }

    #[inline]
    pub fn x0(&self) -> f64 {
        self.start.x
    }

    #[inline]
    pub fn y0(&self) -> f64 {
        self.start.y
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.end.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.end.y
    }

    /// Signed width (`x1 - x0`).
    #[inline]
    pub fn width(&self) -> f64 {
        self.end.x - self.start.x
    }

    /// Signed height (`y1 - y0`).
    #[inline]
    pub fn height(&self) -> f64 {
        self.end.y - self.start.y
    }

    /// Returns the midpoint of the two corners.
    #[inline]
    pub fn center(&self) -> Point<TSpace> {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Returns the unsigned half width and half height.
    #[inline]
    pub fn half_extents(&self) -> (f64, f64) {
        (self.width().abs() / 2.0, self.height().abs() / 2.0)
    }
}

impl<TSpace> std::fmt::Debug for CornerBox<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CornerBox")
            .field("x0", &self.start.x)
            .field("y0", &self.start.y)
            .field("x1", &self.end.x)
            .field("y1", &self.end.y)
            .finish()
    }
}

impl<TSpace> Default for CornerBox<TSpace> {
    fn default() -> Self {
        Self::from_corners(0.0, 0.0, 0.0, 0.0)
    }
}

impl<TSpace> Serialize for CornerBox<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("CornerBox", 4)?;
        state.serialize_field("x0", &self.start.x)?;
        state.serialize_field("y0", &self.start.y)?;
        state.serialize_field("x1", &self.end.x)?;
        state.serialize_field("y1", &self.end.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for CornerBox<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BoxData {
            x0: f64,
            y0: f64,
            x1: f64,
            y1: f64,
        }
        let data = BoxData::deserialize(deserializer)?;
        Ok(CornerBox::from_corners(data.x0, data.y0, data.x1, data.y1))
    }
}
