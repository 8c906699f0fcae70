//! Recognizers for the specialized shape kinds.
//!
//! A polygon that passes none of these tests is kept as a generic path.
//! Both tests accept an explicit vertex count so callers that already
//! dropped a duplicated closing vertex can pass the effective length.

use super::point::{Axis, Point};
use super::utils::{approx_equal, approx_same_point, distance};

/// Number of vertices in the polygon approximation of an ellipse.
///
/// Must be divisible by 8: the symmetry test and the bounding box
/// reconstruction both sample the vertices at 1/8 turns.
pub const ELLIPSE_SIDES: usize = 32;

/// Returns true if `polygon` is an axis-aligned, non-degenerate rectangle.
pub fn is_rectangle<S>(polygon: &[Point<S>]) -> bool {
    is_rectangle_n(polygon, polygon.len())
}

/// [`is_rectangle`] with a caller-supplied vertex count.
///
/// Opposite edges must match on both axes, which admits any parallelogram.
/// The x-coordinate check below then rejects rotated quadrilaterals; it does
/// not reject every skewed one, and callers rely on exactly this boundary.
pub fn is_rectangle_n<S>(polygon: &[Point<S>], len: usize) -> bool {
    if len != 4 || polygon.len() < 4 {
        return false;
    }
    let p = polygon;

    for axis in [Axis::X, Axis::Y] {
        let a = p[0].get(axis) - p[1].get(axis);
        let b = p[3].get(axis) - p[2].get(axis);
        if !approx_equal(a, b) {
            return false;
        }

        let c = p[0].get(axis) - p[3].get(axis);
        let d = p[1].get(axis) - p[2].get(axis);
        if !approx_equal(c, d) {
            return false;
        }
    }

    if !approx_equal(p[0].x, p[1].x) && !approx_equal(p[0].x, p[3].x) {
        return false;
    }

    // zero area, including a collapsed edge at vertex 0
    if approx_same_point(&p[0], &p[1]) || approx_same_point(&p[0], &p[3]) {
        return false;
    }
    !(approx_equal(p[0].x, p[2].x) || approx_equal(p[0].y, p[2].y))
}

/// Returns true if `polygon` is a 32-gon symmetric about two orthogonal
/// axes, i.e. an unrotated ellipse approximation.
pub fn is_ellipse_polygon<S>(polygon: &[Point<S>]) -> bool {
    is_ellipse_polygon_n(polygon, polygon.len())
}

/// [`is_ellipse_polygon`] with a caller-supplied vertex count.
///
/// For each vertex `i` the chord to the vertex half a turn away must match
/// the chord of the mirrored vertex `k`. Holds for any axis-aligned scaling
/// of a circle's vertices; an oblique affine image of the circle fails.
pub fn is_ellipse_polygon_n<S>(polygon: &[Point<S>], len: usize) -> bool {
    const N: usize = ELLIPSE_SIDES;
    if len != N || polygon.len() < N {
        return false;
    }

    (0..N).all(|i| {
        let k = (2 * N - i) % N;
        let i2 = (N / 2 + i) % N;
        let k2 = (N / 2 + k) % N;

        approx_equal(
            distance(&polygon[i], &polygon[i2]),
            distance(&polygon[k], &polygon[k2]),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ellipse::polygon_from_box;
    use crate::geom::{CornerBox, Pixel};

    fn poly(points: &[(f64, f64)]) -> Vec<Point<Pixel>> {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_axis_aligned_rectangle() {
        let rect = poly(&[(0.0, 0.0), (0.0, 10.0), (20.0, 10.0), (20.0, 0.0)]);
        assert!(is_rectangle(&rect));
    }

    #[test]
    fn test_rectangle_all_cyclic_shifts() {
        let rect = poly(&[(1.0, 2.0), (1.0, 7.0), (9.0, 7.0), (9.0, 2.0)]);
        for shift in 0..4 {
            let mut shifted = rect.clone();
            shifted.rotate_left(shift);
            assert!(is_rectangle(&shifted), "shift {shift} rejected");
        }
    }

    #[test]
    fn test_rotated_square_rejected() {
        let diamond = poly(&[(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        assert!(!is_rectangle(&diamond));
    }

    #[test]
    fn test_zero_area_rejected() {
        let flat = poly(&[(0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0)]);
        assert!(!is_rectangle(&flat));
    }

    #[test]
    fn test_collapsed_parallelogram_rejected() {
        let sliver = poly(&[(0.0, 0.0), (0.0, 0.0), (10.0, 5.0), (10.0, 5.0)]);
        assert!(!is_rectangle(&sliver));

        let sliver = poly(&[(0.0, 0.0), (10.0, 5.0), (10.0, 5.0), (0.0, 0.0)]);
        assert!(!is_rectangle(&sliver));
    }

    #[test]
    fn test_wrong_vertex_count_rejected() {
        let triangle = poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 0.0)]);
        assert!(!is_rectangle(&triangle));

        let closed = poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        assert!(!is_rectangle(&closed));
        assert!(is_rectangle_n(&closed, 4));
    }

    #[test]
    fn test_unequal_opposite_edges_rejected() {
        let trapezoid = poly(&[(0.0, 0.0), (0.0, 10.0), (12.0, 10.0), (10.0, 0.0)]);
        assert!(!is_rectangle(&trapezoid));
    }

    #[test]
    fn test_vertical_skew_passes_heuristic() {
        // Opposite edges match and vertex 0 shares x with vertex 1.
        let skewed = poly(&[(0.0, 0.0), (0.0, 10.0), (10.0, 15.0), (10.0, 5.0)]);
        assert!(is_rectangle(&skewed));
    }

    #[test]
    fn test_ellipse_polygon_from_box() {
        let ellipse = polygon_from_box(&CornerBox::<Pixel>::from_corners(0.0, 0.0, 40.0, 10.0));
        assert!(is_ellipse_polygon(&ellipse));
    }

    #[test]
    fn test_ellipse_wrong_count_rejected() {
        let ellipse = polygon_from_box(&CornerBox::<Pixel>::from_corners(0.0, 0.0, 40.0, 10.0));
        assert!(!is_ellipse_polygon(&ellipse[..31]));
        assert!(!is_ellipse_polygon_n(&ellipse, 31));
    }

    #[test]
    fn test_perturbed_ellipse_rejected() {
        let mut ellipse =
            polygon_from_box(&CornerBox::<Pixel>::from_corners(0.0, 0.0, 40.0, 10.0));
        ellipse[3] = ellipse[3].offset(0.5, 0.0);
        assert!(!is_ellipse_polygon(&ellipse));
    }

    #[test]
    fn test_stretched_rotated_ellipse_rejected() {
        let (s, c) = 0.3f64.sin_cos();
        let sheared: Vec<Point<Pixel>> =
            polygon_from_box(&CornerBox::<Pixel>::from_corners(-20.0, -5.0, 20.0, 5.0))
                .into_iter()
                .map(|p| Point::new(2.0 * (p.x * c - p.y * s), p.x * s + p.y * c))
                .collect();
        assert!(!is_ellipse_polygon(&sheared));
    }
}
