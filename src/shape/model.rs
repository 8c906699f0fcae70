//! The committed shape record exchanged with the host.
//!
//! A descriptor is a flat JSON object: the style block plus a `type` tag and
//! either the two-corner fields `x0, y0, x1, y1` or a `path` string.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geom::utils::approx_equal;

/// One coordinate of a committed shape.
///
/// Numbers on linear, log and category axes; date strings on date axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeValue {
    Number(f64),
    Date(String),
}

impl ShapeValue {
    /// Returns the numeric value, parsing numeric strings.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ShapeValue::Number(v) => Some(*v),
            ShapeValue::Date(s) => s.trim().parse().ok(),
        }
    }

    /// Equality with the geometric tolerance for numbers, exact for strings.
    pub fn approx_eq(&self, other: &ShapeValue) -> bool {
        match (self, other) {
            (ShapeValue::Number(a), ShapeValue::Number(b)) => approx_equal(*a, *b),
            (ShapeValue::Date(a), ShapeValue::Date(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ShapeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeValue::Number(v) => write!(f, "{v}"),
            ShapeValue::Date(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for ShapeValue {
    fn from(v: f64) -> Self {
        ShapeValue::Number(v)
    }
}

impl From<&str> for ShapeValue {
    fn from(s: &str) -> Self {
        ShapeValue::Date(s.to_string())
    }
}

/// The two defining corners of a line, rect or ellipse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x0: ShapeValue,
    pub y0: ShapeValue,
    pub x1: ShapeValue,
    pub y1: ShapeValue,
}

impl Segment {
    pub fn new(
        x0: impl Into<ShapeValue>,
        y0: impl Into<ShapeValue>,
        x1: impl Into<ShapeValue>,
        y1: impl Into<ShapeValue>,
    ) -> Self {
        Self {
            x0: x0.into(),
            y0: y0.into(),
            x1: x1.into(),
            y1: y1.into(),
        }
    }

    /// The four fields in declaration order, with their names.
    pub fn fields(&self) -> [(&'static str, &ShapeValue); 4] {
        [
            ("x0", &self.x0),
            ("y0", &self.y0),
            ("x1", &self.x1),
            ("y1", &self.y1),
        ]
    }

    /// Mutable access to a field by name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut ShapeValue> {
        match name {
            "x0" => Some(&mut self.x0),
            "y0" => Some(&mut self.y0),
            "x1" => Some(&mut self.x1),
            "y1" => Some(&mut self.y1),
            _ => None,
        }
    }
}

/// Shape type as written in the `type` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Line,
    Rect,
    #[serde(rename = "circle")]
    Ellipse,
    Path,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Line => "line",
            ShapeKind::Rect => "rect",
            ShapeKind::Ellipse => "circle",
            ShapeKind::Path => "path",
        };
        write!(f, "{name}")
    }
}

/// Type tag plus the geometry fields that go with it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Line(Segment),
    Rect(Segment),
    #[serde(rename = "circle")]
    Ellipse(Segment),
    Path { path: String },
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Line(_) => ShapeKind::Line,
            Geometry::Rect(_) => ShapeKind::Rect,
            Geometry::Ellipse(_) => ShapeKind::Ellipse,
            Geometry::Path { .. } => ShapeKind::Path,
        }
    }

    pub fn segment(&self) -> Option<&Segment> {
        match self {
            Geometry::Line(s) | Geometry::Rect(s) | Geometry::Ellipse(s) => Some(s),
            Geometry::Path { .. } => None,
        }
    }

    pub fn segment_mut(&mut self) -> Option<&mut Segment> {
        match self {
            Geometry::Line(s) | Geometry::Rect(s) | Geometry::Ellipse(s) => Some(s),
            Geometry::Path { .. } => None,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Geometry::Path { path } => Some(path),
            _ => None,
        }
    }
}

/// Whether a shape is drawn above or below the data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Above,
    Below,
}

/// Fill rule for self-intersecting or multi-polygon paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    Evenodd,
    Nonzero,
}

/// Outline stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#444".to_string(),
            width: 4.0,
            dash: "solid".to_string(),
        }
    }
}

/// Style template applied to newly drawn shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    #[serde(default)]
    pub layer: Layer,

    #[serde(default = "default_opacity")]
    pub opacity: f64,

    #[serde(default)]
    pub line: LineStyle,

    /// Fill of closed shapes; open shapes never carry one.
    #[serde(default = "default_fillcolor")]
    pub fillcolor: String,

    #[serde(default)]
    pub fillrule: FillRule,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            layer: Layer::Above,
            opacity: default_opacity(),
            line: LineStyle::default(),
            fillcolor: default_fillcolor(),
            fillrule: FillRule::Evenodd,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

fn default_fillcolor() -> String {
    "rgba(0,0,0,0)".to_string()
}

/// A committed shape, as stored in the host's shape list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    #[serde(flatten)]
    pub geometry: Geometry,

    pub xref: String,

    pub yref: String,

    #[serde(default)]
    pub layer: Layer,

    #[serde(default = "default_opacity")]
    pub opacity: f64,

    #[serde(default)]
    pub line: LineStyle,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fillrule: Option<FillRule>,
}

impl ShapeDescriptor {
    /// Creates a descriptor from a geometry, its axis references and a
    /// style template. `closed` decides whether the fill is carried over.
    pub fn new(
        geometry: Geometry,
        xref: impl Into<String>,
        yref: impl Into<String>,
        style: &ShapeStyle,
        closed: bool,
    ) -> Self {
        Self {
            geometry,
            xref: xref.into(),
            yref: yref.into(),
            layer: style.layer,
            opacity: style.opacity,
            line: style.line.clone(),
            fillcolor: closed.then(|| style.fillcolor.clone()),
            fillrule: closed.then_some(style.fillrule),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_descriptor_json_shape() {
        let shape = ShapeDescriptor::new(
            Geometry::Rect(Segment::new(1.0, 2.0, 3.0, 4.0)),
            "x",
            "y",
            &ShapeStyle::default(),
            true,
        );
        let json = serde_json::to_value(&shape).expect("serialize shape");
        assert_eq!(json["type"], "rect");
        assert_eq!(json["x0"], 1.0);
        assert_eq!(json["y1"], 4.0);
        assert_eq!(json["layer"], "above");
        assert_eq!(json["line"]["color"], "#444");
        assert_eq!(json["fillcolor"], "rgba(0,0,0,0)");
        assert_eq!(json["fillrule"], "evenodd");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn test_ellipse_serializes_as_circle() {
        let shape = ShapeDescriptor::new(
            Geometry::Ellipse(Segment::new(0.0, 0.0, 1.0, 1.0)),
            "paper",
            "paper",
            &ShapeStyle::default(),
            true,
        );
        let json = serde_json::to_value(&shape).expect("serialize shape");
        assert_eq!(json["type"], "circle");
    }

    #[test]
    fn test_open_shape_has_no_fill() {
        let shape = ShapeDescriptor::new(
            Geometry::Line(Segment::new(0.0, 0.0, 1.0, 1.0)),
            "x",
            "y",
            &ShapeStyle::default(),
            false,
        );
        let json = serde_json::to_value(&shape).expect("serialize shape");
        assert!(json.get("fillcolor").is_none());
        assert!(json.get("fillrule").is_none());
    }

    #[test]
    fn test_parse_host_record_with_dates_and_defaults() {
        let json = r#"{
            "type": "path",
            "xref": "x",
            "yref": "y",
            "path": "M2024-01-01,1L2024-01-02,2Z"
        }"#;
        let shape: ShapeDescriptor = serde_json::from_str(json).expect("parse shape");
        assert_eq!(shape.kind(), ShapeKind::Path);
        assert_eq!(shape.geometry.path(), Some("M2024-01-01,1L2024-01-02,2Z"));
        assert_eq!(shape.opacity, 1.0);
        assert_eq!(shape.line, LineStyle::default());

        let json = r#"{"type":"line","xref":"x","yref":"y","x0":"2024-01-01","y0":1,"x1":"2024-01-02","y1":2.5}"#;
        let shape: ShapeDescriptor = serde_json::from_str(json).expect("parse line");
        let segment = shape.geometry.segment().expect("line has a segment");
        assert_eq!(segment.x0, ShapeValue::Date("2024-01-01".into()));
        assert_eq!(segment.y1, ShapeValue::Number(2.5));
    }

    #[test]
    fn test_shape_value_approx_eq() {
        assert!(ShapeValue::Number(1.0).approx_eq(&ShapeValue::Number(1.0 + 1e-9)));
        assert!(!ShapeValue::Number(1.0).approx_eq(&ShapeValue::Number(1.1)));
        assert!(!ShapeValue::Number(1.0).approx_eq(&ShapeValue::Date("1".into())));
    }
}
