//! Reference frames mapping screen pixels to committed coordinates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geom::{Data, Pixel, Point, PolygonSet};
use crate::shape::ShapeValue;

/// The reference frame a shape is committed in.
///
/// Serialized with a `kind` tag, e.g. `{"kind": "paper", "left": 80, ...}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Frame {
    /// Committed coordinates are the screen pixels themselves.
    #[default]
    Pixel,
    /// Coordinates normalized to the plot area, y pointing up.
    Paper(PlotArea),
    /// Coordinates in the data space of an x/y axis pair.
    Axes { x: AxisMapping, y: AxisMapping },
}

/// Pixel rectangle of the plot area inside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Scale type of an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    #[default]
    Linear,
    /// Range is given in log10 units.
    Log,
    /// Values are milliseconds since the Unix epoch.
    Date,
    /// Values are category indices.
    Category,
}

/// Linear mapping between one pixel axis and one data axis.
///
/// `range[0]` sits at pixel `offset` and `range[1]` at `offset + length`.
/// Screen y grows downward, so a y axis lists its top value first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisMapping {
    /// Axis identifier written into `xref` / `yref`, e.g. `"x"` or `"y2"`.
    pub id: String,
    #[serde(default)]
    pub kind: AxisKind,
    pub range: [f64; 2],
    pub offset: f64,
    pub length: f64,
}

impl AxisMapping {
    /// Maps a pixel coordinate to a data value.
    pub fn pixel_to_data(&self, px: f64) -> f64 {
        let t = if self.length == 0.0 {
            0.0
        } else {
            (px - self.offset) / self.length
        };
        let linear = self.range[0] + t * (self.range[1] - self.range[0]);
        match self.kind {
            AxisKind::Log => 10f64.powf(linear),
            _ => linear,
        }
    }

    /// Maps a data value back to a pixel coordinate.
    pub fn data_to_pixel(&self, value: f64) -> f64 {
        let linear = match self.kind {
            AxisKind::Log => value.log10(),
            _ => value,
        };
        let span = self.range[1] - self.range[0];
        if span == 0.0 {
            return self.offset;
        }
        self.offset + (linear - self.range[0]) / span * self.length
    }

    /// Wraps a data value as a shape coordinate.
    pub fn value(&self, v: f64) -> ShapeValue {
        match self.kind {
            AxisKind::Date => ShapeValue::Date(encode_date(v)),
            _ => ShapeValue::Number(v),
        }
    }

    /// Reads a shape coordinate back as a data value.
    pub fn read(&self, value: &ShapeValue) -> Option<f64> {
        match value {
            ShapeValue::Number(v) => Some(*v),
            ShapeValue::Date(s) if self.kind == AxisKind::Date => parse_date(s),
            ShapeValue::Date(s) => s.trim().parse().ok(),
        }
    }

    fn format(&self, v: f64) -> String {
        match self.kind {
            AxisKind::Date => encode_date(v),
            _ => v.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Option<f64> {
        match self.kind {
            AxisKind::Date => parse_date(text),
            _ => text.trim().parse().ok(),
        }
    }
}

/// Position of `delta` along a pixel `extent`; a zero extent maps to 0.
fn fraction(delta: f64, extent: f64) -> f64 {
    if extent == 0.0 {
        0.0
    } else {
        delta / extent
    }
}

impl Frame {
    /// Converts a screen point into committed coordinates.
    pub fn to_data(&self, p: Point<Pixel>) -> Point<Data> {
        match self {
            Frame::Pixel => p.cast(),
            Frame::Paper(area) => Point::new(
                fraction(p.x - area.left, area.width),
                1.0 - fraction(p.y - area.top, area.height),
            ),
            Frame::Axes { x, y } => Point::new(x.pixel_to_data(p.x), y.pixel_to_data(p.y)),
        }
    }

    /// Converts committed coordinates back onto the screen.
    pub fn to_pixel(&self, p: Point<Data>) -> Point<Pixel> {
        match self {
            Frame::Pixel => p.cast(),
            Frame::Paper(area) => Point::new(
                area.left + p.x * area.width,
                area.top + (1.0 - p.y) * area.height,
            ),
            Frame::Axes { x, y } => Point::new(x.data_to_pixel(p.x), y.data_to_pixel(p.y)),
        }
    }

    pub fn xref(&self) -> &str {
        match self {
            Frame::Pixel => "pixel",
            Frame::Paper(_) => "paper",
            Frame::Axes { x, .. } => &x.id,
        }
    }

    pub fn yref(&self) -> &str {
        match self {
            Frame::Pixel => "pixel",
            Frame::Paper(_) => "paper",
            Frame::Axes { y, .. } => &y.id,
        }
    }

    pub fn x_kind(&self) -> AxisKind {
        match self {
            Frame::Axes { x, .. } => x.kind,
            _ => AxisKind::Linear,
        }
    }

    pub fn y_kind(&self) -> AxisKind {
        match self {
            Frame::Axes { y, .. } => y.kind,
            _ => AxisKind::Linear,
        }
    }

    /// True if either axis is log or date scaled.
    ///
    /// Ellipses committed on such axes would not stay elliptical, so these
    /// frames only ever produce paths for ellipse drags.
    pub fn has_nonlinear_axis(&self) -> bool {
        [self.x_kind(), self.y_kind()]
            .iter()
            .any(|kind| matches!(kind, AxisKind::Log | AxisKind::Date))
    }

    pub fn x_value(&self, v: f64) -> ShapeValue {
        match self {
            Frame::Axes { x, .. } => x.value(v),
            _ => ShapeValue::Number(v),
        }
    }

    pub fn y_value(&self, v: f64) -> ShapeValue {
        match self {
            Frame::Axes { y, .. } => y.value(v),
            _ => ShapeValue::Number(v),
        }
    }

    pub fn read_x(&self, value: &ShapeValue) -> Option<f64> {
        match self {
            Frame::Axes { x, .. } => x.read(value),
            _ => value.as_number(),
        }
    }

    pub fn read_y(&self, value: &ShapeValue) -> Option<f64> {
        match self {
            Frame::Axes { y, .. } => y.read(value),
            _ => value.as_number(),
        }
    }

    /// Formats a committed vertex as path text, `x,y`.
    pub fn format_point(&self, p: &Point<Data>) -> String {
        match self {
            Frame::Axes { x, y } => format!("{},{}", x.format(p.x), y.format(p.y)),
            _ => format!("{},{}", p.x, p.y),
        }
    }

    /// Decodes a committed path back into screen polygons.
    ///
    /// Committed paths only contain `M`, `L` and `Z`, but their coordinates
    /// may be date strings, so they are split on those letters instead of
    /// going through the numeric tokenizer.
    pub fn decode_committed(&self, path: &str) -> PolygonSet<Pixel> {
        let has_dates = self.x_kind() == AxisKind::Date || self.y_kind() == AxisKind::Date;
        if !has_dates {
            return super::decode_with(path, |p| self.to_pixel(p.cast()));
        }

        let Frame::Axes { x, y } = self else {
            return Vec::new();
        };

        path.split('M')
            .filter(|subpath| !subpath.trim().is_empty())
            .map(|subpath| {
                subpath
                    .split('L')
                    .filter_map(|vertex| {
                        let vertex = vertex.trim_end_matches(['Z', 'z']);
                        let (vx, vy) = vertex.split_once(',')?;
                        match (x.parse(vx), y.parse(vy)) {
                            (Some(px), Some(py)) => Some(self.to_pixel(Point::new(px, py))),
                            _ => {
                                debug!(vertex, "skipping unreadable committed vertex");
                                None
                            }
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Encodes milliseconds since the epoch as `YYYY-MM-DD[ HH:MM[:SS[.fff]]]`.
///
/// Trailing zero components are dropped. Values outside chrono's range are
/// written as plain numbers.
pub fn encode_date(ms: f64) -> String {
    let Some(datetime) = DateTime::from_timestamp_millis(ms.round() as i64) else {
        debug!(ms, "date out of range, writing raw milliseconds");
        return ms.to_string();
    };
    let naive = datetime.naive_utc();
    let millis = naive.nanosecond() / 1_000_000;

    if millis != 0 {
        let fraction = format!("{millis:03}");
        format!(
            "{}.{}",
            naive.format("%Y-%m-%d %H:%M:%S"),
            fraction.trim_end_matches('0')
        )
    } else if naive.second() != 0 {
        naive.format("%Y-%m-%d %H:%M:%S").to_string()
    } else if naive.hour() != 0 || naive.minute() != 0 {
        naive.format("%Y-%m-%d %H:%M").to_string()
    } else {
        naive.format("%Y-%m-%d").to_string()
    }
}

/// Parses the forms written by [`encode_date`] back into milliseconds.
pub fn parse_date(text: &str) -> Option<f64> {
    let text = text.trim();
    let datetime = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(datetime.and_utc().timestamp_millis() as f64)
}
