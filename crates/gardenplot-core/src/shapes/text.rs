//! Text shape.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default font size for text created with the text tool.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Placeholder content for freshly created text objects.
pub const TEXT_PLACEHOLDER: &str = "Text";

/// A text label.
///
/// The core has no font metrics; bounds are approximated from the content
/// length, which is good enough for hit-testing and selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Top-left corner of the text bounding box.
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    #[serde(default = "default_font_size", rename = "fontSize")]
    pub font_size: f64,
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

impl Text {
    /// Create a new text label.
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// Create the placeholder text object made by the text tool.
    pub fn placeholder(position: Point) -> Self {
        Self::new(position, TEXT_PLACEHOLDER)
    }

    /// Font size builder.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Approximate bounding box.
    pub fn bounds(&self) -> Rect {
        let width = self.content.chars().count() as f64 * self.font_size * 0.6;
        let height = self.font_size * 1.2;
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width.max(self.font_size * 0.6),
            self.position.y + height,
        )
    }

    /// Test whether a point hits this text.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_content() {
        let text = Text::placeholder(Point::new(5.0, 5.0));
        assert_eq!(text.content, TEXT_PLACEHOLDER);
        assert!((text.font_size - DEFAULT_FONT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn bounds_scale_with_content() {
        let short = Text::new(Point::new(0.0, 0.0), "ab");
        let long = Text::new(Point::new(0.0, 0.0), "abcdefgh");
        assert!(long.bounds().width() > short.bounds().width());
    }

    #[test]
    fn empty_text_is_still_hittable() {
        let text = Text::new(Point::new(0.0, 0.0), "");
        assert!(text.bounds().width() > 0.0);
    }
}
