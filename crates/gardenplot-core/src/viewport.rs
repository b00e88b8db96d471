//! Viewport zoom and pan.

use kurbo::{Point, Vec2};

/// Minimum zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 2.0;

/// Per-wheel-tick zoom base; zoom multiplies by `0.999^delta`.
const WHEEL_ZOOM_BASE: f64 = 0.999;

/// Maps between screen coordinates and canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Zoom factor (1.0 = 100%).
    pub zoom: f64,
    /// Screen position of the canvas origin.
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl Viewport {
    /// Create a viewport at 100% zoom with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.zoom,
            (screen.y - self.offset.y) / self.zoom,
        )
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(
            canvas.x * self.zoom + self.offset.x,
            canvas.y * self.zoom + self.offset.y,
        )
    }

    /// Apply a mouse-wheel zoom centered on a screen point.
    ///
    /// A positive delta (wheel down) zooms out. The point under the cursor
    /// stays fixed on screen, and the factor is clamped to [0.5, 2.0].
    pub fn wheel_zoom(&mut self, delta: f64, center: Point) {
        let target = self.zoom * WHEEL_ZOOM_BASE.powf(delta);
        self.zoom_at(target, center);
    }

    /// Set the zoom factor, keeping a screen point fixed.
    pub fn zoom_at(&mut self, zoom: f64, center: Point) {
        let anchor = self.screen_to_canvas(center);
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = Vec2::new(
            center.x - anchor.x * self.zoom,
            center.y - anchor.y * self.zoom,
        );
    }

    /// Zoom as a whole percentage, for status display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// Pan the viewport by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Reset to 100% zoom with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
