//! Path-language codec.
//!
//! Shapes are exchanged with the host as a small subset of SVG path data:
//! `M m L l H h V v Z z`, each followed by its numeric arguments. Curves and
//! arcs are not part of the language; any other command is skipped together
//! with its arguments, never rejected.
//!
//! A path string may hold several disjoint sub-paths. Decoding yields one
//! polygon per `M`/`m`, in path order.

mod frame;

pub use frame::{encode_date, parse_date, AxisKind, AxisMapping, Frame, PlotArea};

use tracing::debug;

use crate::geom::utils::{approx_same_point, distance};
use crate::geom::{Pixel, Point, Polygon, PolygonSet};

/// Serialized form of an empty polygon set: a degenerate closed path.
pub const EMPTY_PATH: &str = "M0,0Z";

/// Screen-space distance under which two consecutive points count as one.
pub const DUPLICATE_POINT_THRESHOLD_PX: f64 = 1.0;

/// Decodes a path string into screen-space polygons, without conversion.
pub fn decode(path: &str) -> PolygonSet<Pixel> {
    decode_with(path, |p| p)
}

/// Decodes a path string, passing every emitted point through `convert`.
///
/// The cursor and sub-path start are tracked in raw path coordinates;
/// only emitted points are converted. `Z` moves the cursor back to the
/// sub-path start without emitting a point.
pub fn decode_with<S, F>(path: &str, mut convert: F) -> PolygonSet<S>
where
    F: FnMut(Point<Pixel>) -> Point<S>,
{
    let mut polygons: PolygonSet<S> = Vec::new();
    let mut x = 0.0;
    let mut y = 0.0;
    let mut start_x = 0.0;
    let mut start_y = 0.0;

    for (command, args) in segments(path) {
        let arity = match command.to_ascii_uppercase() {
            'M' | 'L' => 2,
            'H' | 'V' => 1,
            'Z' => {
                x = start_x;
                y = start_y;
                continue;
            }
            _ => {
                debug!(command = %command, "skipping unsupported path command");
                continue;
            }
        };

        let numbers = parse_numbers(args);
        if numbers.len() < arity {
            debug!(command = %command, "skipping path command with missing arguments");
            continue;
        }

        for (repeat, chunk) in numbers.chunks_exact(arity).enumerate() {
            // Extra coordinate pairs after a moveto are implicit linetos.
            let effective = match command {
                'M' if repeat > 0 => 'L',
                'm' if repeat > 0 => 'l',
                other => other,
            };

            match effective {
                'M' | 'm' => {
                    if effective == 'M' {
                        x = chunk[0];
                        y = chunk[1];
                    } else {
                        x += chunk[0];
                        y += chunk[1];
                    }
                    start_x = x;
                    start_y = y;
                    polygons.push(Vec::new());
                }
                'L' => {
                    x = chunk[0];
                    y = chunk[1];
                }
                'l' => {
                    x += chunk[0];
                    y += chunk[1];
                }
                'H' => x = chunk[0],
                'h' => x += chunk[0],
                'V' => y = chunk[0],
                'v' => y += chunk[0],
                _ => unreachable!("arity table covers every accepted command"),
            }

            if polygons.is_empty() {
                polygons.push(Vec::new());
            }
            if let Some(current) = polygons.last_mut() {
                current.push(convert(Point::new(x, y)));
            }
        }
    }

    polygons
}

/// Encodes polygons as a path string with plain numeric coordinates.
///
/// Closed polygons get an explicit edge back to their first vertex and the
/// whole path ends in `Z`; open polygons get neither.
pub fn encode<S>(polygons: &[Polygon<S>], is_open: bool) -> String {
    encode_with(polygons, is_open, |p| format!("{},{}", p.x, p.y))
}

/// Encodes polygons, formatting each vertex with `format_point`.
///
/// Used for date axes, where a coordinate is written as a date string.
pub fn encode_with<S, F>(polygons: &[Polygon<S>], is_open: bool, format_point: F) -> String
where
    F: Fn(&Point<S>) -> String,
{
    if polygons.is_empty() {
        return EMPTY_PATH.to_string();
    }

    let subpaths: Vec<String> = polygons
        .iter()
        .map(|polygon| {
            let mut vertices: Vec<String> = polygon.iter().map(&format_point).collect();
            if !is_open {
                if let Some(first) = polygon.first() {
                    vertices.push(format_point(first));
                }
            }
            vertices.join("L")
        })
        .collect();

    let close = if is_open { "" } else { "Z" };
    format!("M{}{}", subpaths.join("M"), close)
}

/// Drops a trailing vertex that repeats the first one.
pub fn strip_closing_point<S>(polygon: &mut Polygon<S>) {
    if polygon.len() > 1 {
        let first = polygon[0];
        if polygon
            .last()
            .is_some_and(|last| approx_same_point(&first, last))
        {
            polygon.pop();
        }
    }
}

/// [`strip_closing_point`] applied to every polygon of a set.
pub fn strip_closing_points<S>(mut polygons: PolygonSet<S>) -> PolygonSet<S> {
    for polygon in &mut polygons {
        strip_closing_point(polygon);
    }
    polygons
}

/// Drops every point closer than `threshold` to the previously kept point.
pub fn dedupe_adjacent<S>(polygon: &[Point<S>], threshold: f64) -> Polygon<S> {
    let mut kept: Polygon<S> = Vec::with_capacity(polygon.len());
    for point in polygon {
        match kept.last() {
            Some(last) if distance(last, point) < threshold => {}
            _ => kept.push(*point),
        }
    }
    kept
}

/// Fuzz-only entrypoint for path decoding.
#[cfg(feature = "fuzzing")]
pub fn fuzz_decode(input: &str) -> usize {
    let polygons = decode(input);
    let encoded = encode(&polygons, false);
    decode(&encoded).len()
}

/// Splits a path string into `(command, argument text)` pairs.
///
/// Text before the first command letter is ignored. `e`/`E` never start a
/// command since they belong to exponents.
fn segments(path: &str) -> Vec<(char, &str)> {
    let mut out = Vec::new();
    let mut current: Option<(char, usize)> = None;

    for (idx, c) in path.char_indices() {
        if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            if let Some((command, start)) = current {
                out.push((command, &path[start..idx]));
            }
            current = Some((c, idx + c.len_utf8()));
        }
    }
    if let Some((command, start)) = current {
        out.push((command, &path[start..]));
    }
    out
}

/// Scans SVG-style numbers: optional sign, digits with at most one dot,
/// optional exponent. Separators are commas and whitespace; a sign or a
/// second dot also starts a new number (`10-5`, `1.5.5`).
///
/// Stops at the first malformed token.
fn parse_numbers(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() || b == b',' {
            i += 1;
            continue;
        }

        let start = i;
        if b == b'+' || b == b'-' {
            i += 1;
        }

        let mut digits = 0;
        let mut seen_dot = false;
        while i < bytes.len() {
            match bytes[i] {
                b'0'..=b'9' => {
                    digits += 1;
                    i += 1;
                }
                b'.' if !seen_dot => {
                    seen_dot = true;
                    i += 1;
                }
                _ => break,
            }
        }
        if digits == 0 {
            debug!(token = &text[start..], "malformed number in path arguments");
            break;
        }

        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            let exponent_start = j;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j > exponent_start {
                i = j;
            }
        }

        match text[start..i].parse::<f64>() {
            Ok(value) => out.push(value),
            Err(_) => break,
        }
    }

    out
}
