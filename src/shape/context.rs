//! Draw context: the per-document settings a drag is interpreted with.
//!
//! Loaded from JSON or YAML, for example:
//!
//! ```yaml
//! mode: rect
//! frame:
//!   kind: axes
//!   x: { id: x, kind: date, range: [1704067200000, 1706745600000], offset: 80, length: 600 }
//!   y: { id: y, range: [10, 0], offset: 40, length: 300 }
//! style:
//!   line: { color: "#d62728", width: 2, dash: dot }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::model::ShapeStyle;
use crate::error::ShapeDrawError;
use crate::path::Frame;

/// The shape type a drag is meant to produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    Line,
    #[default]
    Rect,
    Ellipse,
    #[serde(rename = "closedpath")]
    ClosedPath,
    #[serde(rename = "openpath")]
    OpenPath,
}

impl DragMode {
    /// Open modes produce unfilled shapes and unclosed paths.
    pub fn is_open(self) -> bool {
        matches!(self, DragMode::Line | DragMode::OpenPath)
    }
}

impl fmt::Display for DragMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DragMode::Line => "line",
            DragMode::Rect => "rect",
            DragMode::Ellipse => "ellipse",
            DragMode::ClosedPath => "closedpath",
            DragMode::OpenPath => "openpath",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DragMode {
    type Err = ShapeDrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" | "drawline" => Ok(DragMode::Line),
            "rect" | "drawrect" => Ok(DragMode::Rect),
            "ellipse" | "circle" | "drawcircle" => Ok(DragMode::Ellipse),
            "closedpath" | "drawclosedpath" => Ok(DragMode::ClosedPath),
            "openpath" | "drawopenpath" => Ok(DragMode::OpenPath),
            other => Err(ShapeDrawError::InvalidArgument(format!(
                "unknown drag mode '{}' (supported: line, rect, ellipse, closedpath, openpath)",
                other
            ))),
        }
    }
}

/// Everything a drag needs besides its points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawContext {
    #[serde(default)]
    pub mode: DragMode,

    #[serde(default)]
    pub frame: Frame,

    #[serde(default)]
    pub style: ShapeStyle,
}

impl DrawContext {
    pub fn new(mode: DragMode, frame: Frame) -> Self {
        Self {
            mode,
            frame,
            style: ShapeStyle::default(),
        }
    }

    pub fn with_mode(mut self, mode: DragMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Reads a draw context, choosing the parser from the file extension.
///
/// `.yaml` and `.yml` are read as YAML, everything else as JSON.
pub fn read_context(path: &Path) -> Result<DrawContext, ShapeDrawError> {
    let text = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&text).map_err(|source| ShapeDrawError::ContextYamlParse {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(&text).map_err(|source| ShapeDrawError::ContextJsonParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{AxisKind, PlotArea};
    use std::io::Write;

    #[test]
    fn test_drag_mode_parse() {
        assert_eq!("drawcircle".parse::<DragMode>().ok(), Some(DragMode::Ellipse));
        assert_eq!("OpenPath".parse::<DragMode>().ok(), Some(DragMode::OpenPath));
        assert!("spline".parse::<DragMode>().is_err());
    }

    #[test]
    fn test_open_modes() {
        assert!(DragMode::Line.is_open());
        assert!(DragMode::OpenPath.is_open());
        assert!(!DragMode::ClosedPath.is_open());
        assert!(!DragMode::Ellipse.is_open());
    }

    #[test]
    fn test_empty_context_uses_defaults() {
        let ctx: DrawContext = serde_json::from_str("{}").expect("parse context");
        assert_eq!(ctx, DrawContext::default());
        assert_eq!(ctx.style.line.width, 4.0);
    }

    #[test]
    fn test_read_yaml_context() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("create temp file");
        writeln!(
            file,
            "mode: ellipse\nframe:\n  kind: axes\n  x: {{ id: x2, kind: log, range: [0, 2], offset: 0, length: 100 }}\n  y: {{ id: y, range: [1, 0], offset: 0, length: 100 }}\n"
        )
        .expect("write context");

        let ctx = read_context(file.path()).expect("read context");
        assert_eq!(ctx.mode, DragMode::Ellipse);
        assert_eq!(ctx.frame.xref(), "x2");
        assert_eq!(ctx.frame.x_kind(), AxisKind::Log);
        assert_eq!(ctx.frame.y_kind(), AxisKind::Linear);
    }

    #[test]
    fn test_read_json_context() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("create temp file");
        write!(
            file,
            r#"{{"mode":"line","frame":{{"kind":"paper","left":10,"top":10,"width":100,"height":50}}}}"#
        )
        .expect("write context");

        let ctx = read_context(file.path()).expect("read context");
        assert_eq!(ctx.mode, DragMode::Line);
        assert_eq!(
            ctx.frame,
            Frame::Paper(PlotArea {
                left: 10.0,
                top: 10.0,
                width: 100.0,
                height: 50.0
            })
        );
    }

    #[test]
    fn test_bad_yaml_reports_path() {
        let mut file = tempfile::Builder::new()
            .suffix(".yml")
            .tempfile()
            .expect("create temp file");
        writeln!(file, "mode: [not, a, mode").expect("write context");

        let err = read_context(file.path()).expect_err("should fail");
        assert!(matches!(err, ShapeDrawError::ContextYamlParse { .. }));
    }
}
