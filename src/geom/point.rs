//! Typed points and point sequences.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A 2D point with a type-level marker for its coordinate space.
///
/// The `TSpace` parameter is either [`Pixel`](super::Pixel) or
/// [`Data`](super::Data).
pub struct Point<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Point<TSpace> {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns the coordinate along `axis`.
    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Returns this point shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Reinterprets the point in another space without touching the values.
    #[inline]
    pub fn cast<TOther>(self) -> Point<TOther> {
        Point::new(self.x, self.y)
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// Manual impls so generic code over `TSpace` needs no marker bounds.
impl<TSpace> Clone for Point<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for Point<TSpace> {}

impl<TSpace> PartialEq for Point<TSpace> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<TSpace> std::fmt::Debug for Point<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<TSpace> Default for Point<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Point<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;
        let mut state = serializer.serialize_tuple(2)?;
        state.serialize_element(&self.x)?;
        state.serialize_element(&self.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Point<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (x, y) = <(f64, f64)>::deserialize(deserializer)?;
        Ok(Point::new(x, y))
    }
}

/// One coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// An ordered sequence of points.
///
/// A polygon may be closed (last point repeats the first, or the path had
/// a close marker) or open (a freeform line).
pub type Polygon<TSpace> = Vec<Point<TSpace>>;

/// All the polygons decoded from one path string, in path order.
pub type PolygonSet<TSpace> = Vec<Polygon<TSpace>>;

/// Addresses one vertex inside a [`PolygonSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexRef {
    /// Index of the polygon in the set.
    pub polygon: usize,
    /// Index of the vertex within that polygon.
    pub vertex: usize,
}

impl VertexRef {
    /// Creates a new vertex reference.
    #[inline]
    pub fn new(polygon: usize, vertex: usize) -> Self {
        Self { polygon, vertex }
    }

    /// Returns the addressed point, if it exists.
    pub fn get<TSpace>(&self, set: &PolygonSet<TSpace>) -> Option<Point<TSpace>> {
        set.get(self.polygon)
            .and_then(|polygon| polygon.get(self.vertex))
            .copied()
    }
}

impl std::fmt::Display for VertexRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.polygon, self.vertex)
    }
}
