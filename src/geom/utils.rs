//! Small numeric helpers shared by the classifiers and editors.

use super::point::{Axis, Point};

/// Absolute tolerance for every geometric equality test.
///
/// There is no scale-relative tolerance: very large or very small coordinate
/// magnitudes can be misclassified. This is a known limitation.
pub const EPSILON: f64 = 1e-6;

/// Euclidean distance between two points.
#[inline]
pub fn distance<S>(a: &Point<S>, b: &Point<S>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// True iff `|a - b| <= EPSILON`.
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// True iff both coordinates are within [`EPSILON`].
#[inline]
pub fn approx_same_point<S>(a: &Point<S>, b: &Point<S>) -> bool {
    approx_equal(a.x, b.x) && approx_equal(a.y, b.y)
}

/// Smallest coordinate along `axis`, or `+inf` for an empty polygon.
pub fn min<S>(polygon: &[Point<S>], axis: Axis) -> f64 {
    polygon
        .iter()
        .map(|p| p.get(axis))
        .fold(f64::INFINITY, f64::min)
}

/// Largest coordinate along `axis`, or `-inf` for an empty polygon.
pub fn max<S>(polygon: &[Point<S>], axis: Axis) -> f64 {
    polygon
        .iter()
        .map(|p| p.get(axis))
        .fold(f64::NEG_INFINITY, f64::max)
}
