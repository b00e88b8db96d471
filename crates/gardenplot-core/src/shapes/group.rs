//! Group shape for composite objects.

use crate::scene::SceneObject;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A group of scene objects moved and selected as one unit.
///
/// Children keep absolute canvas coordinates; translating the group
/// translates every child. Placed planting icons are groups of a rounded
/// rectangle plus one or two text labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Child objects, in z-order within the group.
    pub objects: Vec<SceneObject>,
}

impl Group {
    /// Create a new group from a list of objects.
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    /// Top-left corner of the combined bounding box.
    pub fn position(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.x0, bounds.y0)
    }

    /// Combined bounding box of all children.
    pub fn bounds(&self) -> Rect {
        let mut iter = self.objects.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(first.bounds(), |acc, obj| acc.union(obj.bounds()))
    }

    /// Move every child by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        for obj in &mut self.objects {
            obj.shape.translate(delta);
        }
    }

    /// Test whether a point hits any child.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.objects.iter().any(|obj| obj.hit_test(point, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;
    use crate::shapes::{ObjectStyle, Rectangle, Shape};

    fn rect_obj(x: f64, y: f64, w: f64, h: f64) -> SceneObject {
        SceneObject::new(
            Shape::Rectangle(Rectangle::new(Point::new(x, y), w, h)),
            ObjectStyle::default(),
        )
    }

    #[test]
    fn bounds_union_of_children() {
        let group = Group::new(vec![rect_obj(0.0, 0.0, 10.0, 10.0), rect_obj(40.0, 40.0, 10.0, 10.0)]);
        assert_eq!(group.bounds(), Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(group.position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn translate_moves_all_children() {
        let mut group = Group::new(vec![rect_obj(0.0, 0.0, 10.0, 10.0), rect_obj(20.0, 0.0, 10.0, 10.0)]);
        group.translate(Vec2::new(5.0, 7.0));
        assert_eq!(group.objects[0].shape.position(), Point::new(5.0, 7.0));
        assert_eq!(group.objects[1].shape.position(), Point::new(25.0, 7.0));
    }

    #[test]
    fn empty_group_has_zero_bounds() {
        let group = Group::new(Vec::new());
        assert_eq!(group.bounds(), Rect::ZERO);
    }

    #[test]
    fn hit_test_any_child() {
        let group = Group::new(vec![rect_obj(0.0, 0.0, 10.0, 10.0), rect_obj(40.0, 40.0, 10.0, 10.0)]);
        assert!(group.hit_test(Point::new(45.0, 45.0), 0.0));
        assert!(!group.hit_test(Point::new(25.0, 25.0), 0.0));
    }
}
