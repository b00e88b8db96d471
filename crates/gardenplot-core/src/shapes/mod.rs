//! Shape variants for scene objects.

mod circle;
mod group;
mod line;
mod rectangle;
mod text;

pub use circle::Circle;
pub use group::Group;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::{Text, DEFAULT_FONT_SIZE, TEXT_PLACEHOLDER};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default stroke width for drawn shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Style shared by every scene object.
///
/// Colors are CSS hex strings so documents round-trip unchanged through the
/// layout store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    /// Stroke color.
    pub stroke: String,
    /// Fill color (`None` = transparent, no fill).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke width in canvas pixels.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

impl ObjectStyle {
    /// Outline-only style with the given stroke color.
    pub fn stroke_only(stroke: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            fill: None,
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    /// Filled style with the given stroke and fill colors.
    pub fn filled(stroke: impl Into<String>, fill: impl Into<String>) -> Self {
        Self {
            stroke: stroke.into(),
            fill: Some(fill.into()),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }

    /// Stroke width builder.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self::stroke_only("#000000")
    }
}

/// Geometry variants, tagged for serialization.
///
/// The wire tag matches the tool names of the document format
/// (`rect`, `circle`, `line`, `text`, `group`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    #[serde(rename = "rect")]
    Rectangle(Rectangle),
    #[serde(rename = "circle")]
    Circle(Circle),
    #[serde(rename = "line")]
    Line(Line),
    #[serde(rename = "text")]
    Text(Text),
    #[serde(rename = "group")]
    Group(Group),
}

impl Shape {
    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Group(s) => s.bounds(),
        }
    }

    /// Test whether a canvas point hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Line(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
            Shape::Group(s) => s.hit_test(point, tolerance),
        }
    }

    /// Anchor position (top-left of the bounding box).
    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position,
            Shape::Circle(s) => s.position,
            Shape::Text(s) => s.position,
            Shape::Line(s) => s.position(),
            Shape::Group(s) => s.position(),
        }
    }

    /// Move the shape so its anchor lands on `position`.
    pub fn set_position(&mut self, position: Point) {
        let delta = position - self.position();
        self.translate(delta);
    }

    /// Move the shape by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rectangle(s) => s.position += delta,
            Shape::Circle(s) => s.position += delta,
            Shape::Text(s) => s.position += delta,
            Shape::Line(s) => {
                s.start += delta;
                s.end += delta;
            }
            Shape::Group(s) => s.translate(delta),
        }
    }

    /// Check if this shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }
}

/// Distance from a point to a line segment (a→b).
pub(crate) fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_serializes_with_type_tag() {
        let shape = Shape::Rectangle(Rectangle::new(Point::new(1.0, 2.0), 30.0, 40.0));
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["width"], 30.0);
    }

    #[test]
    fn set_position_translates_line_endpoints() {
        let mut shape = Shape::Line(Line::new(Point::new(10.0, 10.0), Point::new(30.0, 50.0)));
        shape.set_position(Point::new(0.0, 0.0));
        let Shape::Line(line) = &shape else {
            unreachable!()
        };
        assert_eq!(line.start, Point::new(0.0, 0.0));
        assert_eq!(line.end, Point::new(20.0, 40.0));
    }

    #[test]
    fn segment_distance() {
        let d = point_to_segment_dist(
            Point::new(5.0, 5.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 5.0).abs() < f64::EPSILON);
    }
}
