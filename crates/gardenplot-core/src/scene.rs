//! Scene graph: ordered objects plus canvas metadata.

use crate::shapes::{ObjectStyle, Shape};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Default canvas background color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Hit-test tolerance for pointer picks, in canvas pixels.
const HIT_TOLERANCE: f64 = 4.0;

/// Planting metadata carried by placed crop icons.
///
/// Wire names match the layout document format so placed icons round-trip
/// through save/load and duplication unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantingTag {
    /// Crop identifier.
    #[serde(rename = "cropId")]
    pub crop_id: String,
    /// Placement identifier (one crop can be planted in several spots).
    #[serde(rename = "locationCropId")]
    pub location_crop_id: String,
    /// Display label.
    #[serde(rename = "cropName")]
    pub crop_name: String,
    /// Planting date label, if known.
    #[serde(rename = "plantedDate", default, skip_serializing_if = "Option::is_none")]
    pub planted_date: Option<String>,
}

/// A single drawable object: shared base record plus a tagged shape variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Unique object identifier.
    pub id: Uuid,
    /// Geometry variant (serialized inline with a `type` tag).
    #[serde(flatten)]
    pub shape: Shape,
    /// Stroke/fill style.
    pub style: ObjectStyle,
    /// Whether the object can be selected.
    #[serde(default = "default_true")]
    pub selectable: bool,
    /// Whether the object responds to pointer events.
    #[serde(default = "default_true")]
    pub evented: bool,
    /// Overlay tag: grid lines are structural and are excluded from
    /// selection, duplication, and persistence.
    #[serde(rename = "isGridLine", default, skip_serializing_if = "is_false")]
    pub grid_line: bool,
    /// Planting metadata for placed crop icons.
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub planting: Option<PlantingTag>,
}

fn default_true() -> bool {
    true
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl SceneObject {
    /// Create a regular content object.
    pub fn new(shape: Shape, style: ObjectStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
            style,
            selectable: true,
            evented: true,
            grid_line: false,
            planting: None,
        }
    }

    /// Create a non-interactive overlay object (grid line).
    pub fn overlay(shape: Shape, style: ObjectStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
            style,
            selectable: false,
            evented: false,
            grid_line: true,
            planting: None,
        }
    }

    /// Attach planting metadata.
    pub fn with_planting(mut self, tag: PlantingTag) -> Self {
        self.planting = Some(tag);
        self
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Test whether a canvas point hits this object.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.shape.hit_test(point, tolerance)
    }

    /// Anchor position (top-left of the bounding box).
    pub fn position(&self) -> Point {
        self.shape.position()
    }

    /// Move the object so its anchor lands on `position`.
    pub fn set_position(&mut self, position: Point) {
        self.shape.set_position(position);
    }

    /// Move the object by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    /// Clone this object with fresh identifiers, offset by `delta`.
    ///
    /// Planting metadata is preserved; group children get fresh ids too so
    /// no two objects in the scene ever share one.
    pub fn duplicate(&self, delta: Vec2) -> Self {
        let mut clone = self.clone();
        clone.regenerate_ids();
        clone.translate(delta);
        clone
    }

    fn regenerate_ids(&mut self) {
        self.id = Uuid::new_v4();
        if let Shape::Group(group) = &mut self.shape {
            for child in &mut group.objects {
                child.regenerate_ids();
            }
        }
    }
}

/// Serialized scene: object list plus canvas metadata.
///
/// Overlay objects are never part of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Content objects in z-order.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: f64,
    /// Canvas background color.
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

/// The live scene: ordered objects (index order = z-order, back to front)
/// plus canvas metadata. Owned exclusively by the editor.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Canvas background color.
    pub background: String,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with default canvas metadata.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create an empty scene with the given canvas size.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            objects: Vec::new(),
            width,
            height,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }

    /// Add an object on top of the z-order. Returns its id.
    pub fn add(&mut self, object: SceneObject) -> Uuid {
        let id = object.id;
        self.objects.push(object);
        id
    }

    /// Add an overlay object at the bottom of the z-order, behind content.
    pub fn add_overlay(&mut self, object: SceneObject) -> Uuid {
        let id = object.id;
        self.objects.insert(0, object);
        id
    }

    /// Remove an object by id.
    pub fn remove(&mut self, id: Uuid) -> Option<SceneObject> {
        let index = self.objects.iter().position(|obj| obj.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Get an object by id.
    pub fn get(&self, id: Uuid) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    /// Get a mutable object by id.
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|obj| obj.id == id)
    }

    /// All objects in z-order, overlays included.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Content objects in z-order (overlays excluded).
    pub fn content(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|obj| !obj.grid_line)
    }

    /// Check whether an id belongs to an overlay object.
    pub fn is_overlay(&self, id: Uuid) -> bool {
        self.get(id).is_some_and(|obj| obj.grid_line)
    }

    /// Remove every overlay object.
    pub fn remove_overlays(&mut self) {
        self.objects.retain(|obj| !obj.grid_line);
    }

    /// Topmost evented object under the pointer, if any.
    pub fn hit_test_top(&self, point: Point) -> Option<Uuid> {
        self.objects
            .iter()
            .rev()
            .find(|obj| obj.evented && obj.hit_test(point, HIT_TOLERANCE))
            .map(|obj| obj.id)
    }

    /// Set the selectable flag on every content object.
    pub fn set_all_selectable(&mut self, selectable: bool) {
        for obj in &mut self.objects {
            if !obj.grid_line {
                obj.selectable = selectable;
            }
        }
    }

    /// Number of objects, overlays included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects at all.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize to a document, excluding overlays.
    pub fn to_document(&self) -> SceneDocument {
        SceneDocument {
            objects: self.content().cloned().collect(),
            width: self.width,
            height: self.height,
            background: self.background.clone(),
        }
    }

    /// Replace scene contents from a document. Overlays are dropped; the
    /// editor re-applies the grid afterwards when it is enabled.
    pub fn load_document(&mut self, document: SceneDocument) {
        self.objects = document.objects;
        self.objects.retain(|obj| !obj.grid_line);
        self.width = document.width;
        self.height = document.height;
        self.background = document.background;
    }

    /// Serialize the content objects to a JSON snapshot string.
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.to_document())
    }

    /// Restore scene contents from a JSON snapshot string.
    pub fn apply_snapshot(&mut self, snapshot: &str) -> serde_json::Result<()> {
        let document: SceneDocument = serde_json::from_str(snapshot)?;
        self.load_document(document);
        Ok(())
    }
}
