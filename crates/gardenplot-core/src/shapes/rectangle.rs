//! Rectangle shape.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Corner radius (0 = sharp corners).
    #[serde(rename = "rx", default, skip_serializing_if = "is_zero")]
    pub corner_radius: f64,
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
            corner_radius: 0.0,
        }
    }

    /// Create a rectangle spanning a drag from `anchor` to `pointer`.
    ///
    /// Width and height are always non-negative; when the drag moves left or
    /// up past the anchor, the top-left corner follows the pointer instead.
    pub fn from_drag(anchor: Point, pointer: Point) -> Self {
        Self::new(
            Point::new(anchor.x.min(pointer.x), anchor.y.min(pointer.y)),
            (pointer.x - anchor.x).abs(),
            (pointer.y - anchor.y).abs(),
        )
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// Bounding box.
    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }

    /// Test whether a point hits this rectangle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_rect().inflate(tolerance, tolerance).contains(point)
    }
}
