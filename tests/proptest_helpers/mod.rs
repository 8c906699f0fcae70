#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use shapedraw::geom::{CornerBox, Pixel, Point, Polygon, PolygonSet};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Coordinates on a 1/8 pixel grid, so every value prints and parses back
/// exactly.
pub fn arb_coord() -> BoxedStrategy<f64> {
    (-8000i32..=8000).prop_map(|v| v as f64 / 8.0).boxed()
}

pub fn arb_point() -> BoxedStrategy<Point<Pixel>> {
    (arb_coord(), arb_coord())
        .prop_map(|(x, y)| Point::new(x, y))
        .boxed()
}

/// A polygon with at least three vertices and no two adjacent vertices
/// equal, including the wrap from last to first.
pub fn arb_polygon(max_len: usize) -> BoxedStrategy<Polygon<Pixel>> {
    proptest::collection::vec(arb_point(), 3..=max_len.max(3))
        .prop_map(|points| {
            let mut polygon: Polygon<Pixel> = Vec::with_capacity(points.len());
            for p in points {
                if polygon.last() != Some(&p) {
                    polygon.push(p);
                }
            }
            while polygon.len() > 1 && polygon.first() == polygon.last() {
                polygon.pop();
            }
            polygon
        })
        .prop_filter("needs three distinct vertices", |p| p.len() >= 3)
        .boxed()
}

pub fn arb_polygon_set(max_polygons: usize, max_len: usize) -> BoxedStrategy<PolygonSet<Pixel>> {
    proptest::collection::vec(arb_polygon(max_len), 1..=max_polygons.max(1)).boxed()
}

/// An axis-aligned box with nonzero width and height, either corner first.
pub fn arb_box() -> BoxedStrategy<CornerBox<Pixel>> {
    (arb_coord(), arb_coord(), 1i32..=4000, 1i32..=4000, any::<bool>(), any::<bool>())
        .prop_map(|(x, y, w, h, flip_x, flip_y)| {
            let w = if flip_x { -(w as f64) } else { w as f64 } / 4.0;
            let h = if flip_y { -(h as f64) } else { h as f64 } / 4.0;
            CornerBox::from_corners(x, y, x + w, y + h)
        })
        .boxed()
}

/// The rectangle of `bbox` in drawing order.
pub fn rect_polygon(bbox: &CornerBox<Pixel>) -> Polygon<Pixel> {
    vec![
        Point::new(bbox.x0(), bbox.y0()),
        Point::new(bbox.x0(), bbox.y1()),
        Point::new(bbox.x1(), bbox.y1()),
        Point::new(bbox.x1(), bbox.y0()),
    ]
}
