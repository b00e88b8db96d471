//! Grid overlay and snap-to-grid settings.

use crate::scene::{Scene, SceneObject};
use crate::shapes::{Line, ObjectStyle, Shape};
use kurbo::Point;

/// Default grid cell size in canvas pixels.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Stroke color of grid overlay lines.
pub const GRID_LINE_COLOR: &str = "#ddd";

/// Grid visibility, snapping, and cell size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Whether the grid overlay is shown.
    pub enabled: bool,
    /// Whether object positions snap to grid intersections.
    pub snap_enabled: bool,
    /// Cell size in canvas pixels.
    pub size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            snap_enabled: false,
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl GridSettings {
    /// Snapping is only in effect while the grid is visible.
    pub fn is_snapping(&self) -> bool {
        self.enabled && self.snap_enabled
    }

    /// Quantize a point to the nearest grid intersection.
    pub fn snap_point(&self, point: Point) -> Point {
        Point::new(
            (point.x / self.size).round() * self.size,
            (point.y / self.size).round() * self.size,
        )
    }

    /// Snap a point only when snapping is in effect.
    pub fn maybe_snap(&self, point: Point) -> Point {
        if self.is_snapping() {
            self.snap_point(point)
        } else {
            point
        }
    }
}

/// Rebuild the grid overlay for the scene's current size.
///
/// Existing overlay lines are removed first, so this is safe to call after
/// resizes and snapshot restores. Lines land at the bottom of the z-order
/// and are neither selectable nor evented.
pub fn apply_grid(scene: &mut Scene, settings: &GridSettings) {
    scene.remove_overlays();
    if !settings.enabled {
        return;
    }
    let style = ObjectStyle::stroke_only(GRID_LINE_COLOR).with_stroke_width(1.0);
    let columns = (scene.width / settings.size) as usize;
    let rows = (scene.height / settings.size) as usize;
    for i in 0..=columns {
        let x = i as f64 * settings.size;
        scene.add_overlay(SceneObject::overlay(
            Shape::Line(Line::new(Point::new(x, 0.0), Point::new(x, scene.height))),
            style.clone(),
        ));
    }
    for i in 0..=rows {
        let y = i as f64 * settings.size;
        scene.add_overlay(SceneObject::overlay(
            Shape::Line(Line::new(Point::new(0.0, y), Point::new(scene.width, y))),
            style.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_intersection() {
        let grid = GridSettings {
            enabled: true,
            snap_enabled: true,
            ..Default::default()
        };
        assert_eq!(grid.snap_point(Point::new(27.0, 33.0)), Point::new(20.0, 40.0));
        assert_eq!(grid.snap_point(Point::new(30.0, 10.0)), Point::new(40.0, 20.0));
    }

    #[test]
    fn snap_requires_visible_grid() {
        let grid = GridSettings {
            enabled: false,
            snap_enabled: true,
            ..Default::default()
        };
        assert!(!grid.is_snapping());
        assert_eq!(grid.maybe_snap(Point::new(27.0, 33.0)), Point::new(27.0, 33.0));
    }

    #[test]
    fn overlay_covers_the_canvas() {
        let mut scene = Scene::with_size(800.0, 600.0);
        let grid = GridSettings {
            enabled: true,
            ..Default::default()
        };
        apply_grid(&mut scene, &grid);
        // 41 vertical + 31 horizontal lines at the default cell size.
        assert_eq!(scene.len(), 72);
        assert!(scene.objects().iter().all(|obj| obj.grid_line));
        assert!(scene.objects().iter().all(|obj| !obj.selectable && !obj.evented));
    }

    #[test]
    fn reapply_does_not_stack_lines() {
        let mut scene = Scene::with_size(800.0, 600.0);
        let grid = GridSettings {
            enabled: true,
            ..Default::default()
        };
        apply_grid(&mut scene, &grid);
        apply_grid(&mut scene, &grid);
        assert_eq!(scene.len(), 72);
        apply_grid(&mut scene, &GridSettings::default());
        assert!(scene.is_empty());
    }
}
