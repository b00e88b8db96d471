//! Circle shape.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A circle anchored by the top-left corner of its bounding box.
///
/// The anchor stays fixed while the radius grows during a draw, matching the
/// way the drawing session computes the radius from the pointer-down point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Top-left corner of the bounding box.
    pub position: Point,
    /// Radius in canvas pixels.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(position: Point, radius: f64) -> Self {
        Self { position, radius }
    }

    /// Center of the circle.
    pub fn center(&self) -> Point {
        Point::new(self.position.x + self.radius, self.position.y + self.radius)
    }

    /// Bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.radius * 2.0,
            self.position.y + self.radius * 2.0,
        )
    }

    /// Test whether a point hits this circle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let center = self.center();
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        (dx * dx + dy * dy).sqrt() <= self.radius + tolerance
    }
}
