//! Selection state and selection-level edits.

use crate::scene::Scene;
use kurbo::Vec2;
use uuid::Uuid;

/// Offset applied to duplicated objects.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// The set of selected object ids, in selection order.
///
/// Overlay objects and non-selectable objects never enter the set; every
/// mutator filters them out, so callers can feed raw pick results straight
/// in.
#[derive(Debug, Default)]
pub struct Selection {
    ids: Vec<Uuid>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of selected objects.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the given id is selected.
    pub fn contains(&self, id: Uuid) -> bool {
        self.ids.contains(&id)
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the selection with a single object.
    pub fn select_one(&mut self, scene: &Scene, id: Uuid) {
        self.ids.clear();
        if Self::eligible(scene, id) {
            self.ids.push(id);
        }
    }

    /// Replace the selection with a set of objects (e.g. a box select).
    pub fn select_many(&mut self, scene: &Scene, ids: impl IntoIterator<Item = Uuid>) {
        self.ids.clear();
        self.ids
            .extend(ids.into_iter().filter(|&id| Self::eligible(scene, id)));
    }

    /// Toggle one object in or out of the selection (modifier-click).
    pub fn toggle(&mut self, scene: &Scene, id: Uuid) {
        if let Some(index) = self.ids.iter().position(|&sel| sel == id) {
            self.ids.remove(index);
        } else if Self::eligible(scene, id) {
            self.ids.push(id);
        }
    }

    /// Drop ids that no longer resolve to a scene object.
    pub fn prune(&mut self, scene: &Scene) {
        self.ids.retain(|&id| scene.get(id).is_some());
    }

    /// Clone every selected object with a small offset, then select the
    /// clones as one batch. Returns the clone ids.
    ///
    /// All clones are created before any is selected, so duplicating a
    /// multi-selection yields a single batch selection of the clones.
    pub fn duplicate(&mut self, scene: &mut Scene) -> Vec<Uuid> {
        let clones: Vec<_> = self
            .ids
            .iter()
            .filter_map(|&id| scene.get(id))
            .map(|obj| obj.duplicate(DUPLICATE_OFFSET))
            .collect();
        let ids: Vec<_> = clones.into_iter().map(|clone| scene.add(clone)).collect();
        self.ids = ids.clone();
        ids
    }

    /// Remove every selected object from the scene. Returns how many went.
    pub fn delete(&mut self, scene: &mut Scene) -> usize {
        let mut removed = 0;
        for id in self.ids.drain(..) {
            if scene.remove(id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    fn eligible(scene: &Scene, id: Uuid) -> bool {
        scene
            .get(id)
            .is_some_and(|obj| obj.selectable && !obj.grid_line)
    }
}
