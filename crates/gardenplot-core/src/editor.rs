//! The editor facade: wires tools, selection, grid, history, and autosave
//! together behind a pointer/keyboard API.

use crate::grid::{apply_grid, GridSettings};
use crate::history::History;
use crate::input::{self, Command, Key, Modifiers};
use crate::remote::{AutosaveTimer, PositionUpdate};
use crate::scene::{PlantingTag, Scene, SceneDocument, SceneObject};
use crate::selection::Selection;
use crate::shapes::{Group, ObjectStyle, Rectangle, Shape, Text};
use crate::tools::{DrawBegin, ToolKind, ToolManager};
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use std::time::Instant;
use uuid::Uuid;

/// Size of a placed planting icon.
pub const ICON_WIDTH: f64 = 80.0;
/// Height of a placed planting icon.
pub const ICON_HEIGHT: f64 = 60.0;

const ICON_CORNER_RADIUS: f64 = 8.0;
const ICON_FILL: &str = "#4caf50";
const ICON_NAME_COLOR: &str = "#ffffff";
const ICON_NAME_SIZE: f64 = 12.0;
const ICON_DATE_COLOR: &str = "#e8f5e9";
const ICON_DATE_SIZE: f64 = 9.0;

/// A crop dragged in from the host UI's palette.
///
/// Fields arrive as raw strings from the drag payload; empty strings mean
/// the field was missing.
#[derive(Debug, Clone, Default)]
pub struct PlantingDrop {
    /// Crop identifier.
    pub crop_id: String,
    /// Placement identifier.
    pub location_crop_id: String,
    /// Display label.
    pub crop_name: String,
    /// Planting date label.
    pub planted_date: String,
}

/// Something the editor needs its host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRequest {
    /// Save the layout now (Ctrl+S).
    Save,
}

#[derive(Debug)]
struct DragState {
    id: Uuid,
    grab: Vec2,
    moved: bool,
}

/// The headless canvas editor.
///
/// Owns the scene and all editing state. Pointer and keyboard events come
/// in already converted to canvas coordinates (see [`Viewport`]); saving
/// and loading go through the host, which owns the persistence bridge.
#[derive(Debug)]
pub struct Editor {
    /// The scene being edited.
    pub scene: Scene,
    /// Active tool and draw colors.
    pub tools: ToolManager,
    /// Selected objects.
    pub selection: Selection,
    /// Viewport zoom and pan.
    pub viewport: Viewport,
    grid: GridSettings,
    history: History,
    autosave: AutosaveTimer,
    restoring: bool,
    text_editing: Option<Uuid>,
    drag: Option<DragState>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty scene and the select tool active.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            tools: ToolManager::new(),
            selection: Selection::new(),
            viewport: Viewport::new(),
            grid: GridSettings::default(),
            history: History::new(),
            autosave: AutosaveTimer::default(),
            restoring: false,
            text_editing: None,
            drag: None,
        }
    }

    /// Replace the scene from a fetched layout and reset editing state.
    ///
    /// The loaded state becomes the floor of the history, so undo cannot
    /// step past it.
    pub fn hydrate(&mut self, document: SceneDocument) {
        self.scene.load_document(document);
        apply_grid(&mut self.scene, &self.grid);
        self.selection.clear();
        self.drag = None;
        self.text_editing = None;
        self.history.clear();
        self.record_snapshot();
        self.autosave.cancel();
    }

    /// The scene as a savable document (overlays excluded).
    pub fn document(&self) -> SceneDocument {
        self.scene.to_document()
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.tools.current()
    }

    /// Switch tools. Shape tools lock selection; select/delete restore it.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_current(tool, &mut self.scene);
        self.scene.set_all_selectable(tool.objects_selectable());
        if !tool.objects_selectable() {
            self.selection.clear();
        }
        self.drag = None;
    }

    /// Grid settings.
    pub fn grid(&self) -> &GridSettings {
        &self.grid
    }

    /// Show or hide the grid overlay.
    pub fn set_grid_enabled(&mut self, enabled: bool) {
        self.grid.enabled = enabled;
        apply_grid(&mut self.scene, &self.grid);
    }

    /// Turn snap-to-grid on or off. Takes effect only while the grid shows.
    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.grid.snap_enabled = enabled;
    }

    /// Whether a text label is being edited inline.
    pub fn is_text_editing(&self) -> bool {
        self.text_editing.is_some()
    }

    /// Handle pointer-down at a canvas point.
    pub fn pointer_down(&mut self, point: Point, modifiers: Modifiers, now: Instant) {
        match self.tools.current() {
            ToolKind::Select => self.select_at(point, modifiers),
            ToolKind::Delete => {
                if let Some(id) = self.scene.hit_test_top(point) {
                    self.scene.remove(id);
                    self.selection.prune(&self.scene);
                    self.commit(now);
                }
            }
            _ => match self.tools.begin(&mut self.scene, point) {
                DrawBegin::TextCreated(id) => {
                    self.commit(now);
                    self.text_editing = Some(id);
                }
                DrawBegin::Started(_) | DrawBegin::Ignored => {}
            },
        }
    }

    /// Handle pointer-move with the button held.
    pub fn pointer_move(&mut self, point: Point) {
        if self.tools.is_drawing() {
            self.tools.update(&mut self.scene, point);
            return;
        }
        let Some(drag) = &mut self.drag else {
            return;
        };
        let target = self.grid.maybe_snap(point - drag.grab);
        if let Some(object) = self.scene.get_mut(drag.id) {
            if object.position() != target {
                object.set_position(target);
                drag.moved = true;
            }
        }
    }

    /// Handle pointer-up.
    ///
    /// Finishing a draw or a move commits a history snapshot. Moving a
    /// placed planting icon additionally yields a position update for the
    /// host to send, fire-and-forget.
    pub fn pointer_up(&mut self, now: Instant) -> Option<PositionUpdate> {
        if self.tools.finish().is_some() {
            self.commit(now);
            // Finishing a draw hands control back to the select tool.
            self.set_tool(ToolKind::Select);
            return None;
        }
        let drag = self.drag.take()?;
        if !drag.moved {
            return None;
        }
        self.commit(now);
        let object = self.scene.get(drag.id)?;
        let planting = object.planting.as_ref()?;
        let position = object.position();
        Some(PositionUpdate {
            location_crop_id: planting.location_crop_id.clone(),
            x: position.x,
            y: position.y,
        })
    }

    /// Handle a key press. Returns a request the host must carry out.
    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        now: Instant,
    ) -> Option<EditorRequest> {
        let command = input::resolve(key, modifiers, self.is_text_editing())?;
        match command {
            Command::Save => return Some(EditorRequest::Save),
            Command::Undo => {
                self.undo(now);
            }
            Command::Redo => {
                self.redo(now);
            }
            Command::Duplicate => {
                self.duplicate_selected(now);
            }
            Command::DeleteSelection => {
                self.delete_selected(now);
            }
            Command::SwitchTool(tool) => self.set_tool(tool),
        }
        None
    }

    /// Step back one history snapshot.
    pub fn undo(&mut self, now: Instant) -> bool {
        let Some(snapshot) = self.history.undo().map(str::to_string) else {
            return false;
        };
        self.restore(&snapshot);
        self.autosave.arm(now);
        true
    }

    /// Step forward one history snapshot.
    pub fn redo(&mut self, now: Instant) -> bool {
        let Some(snapshot) = self.history.redo().map(str::to_string) else {
            return false;
        };
        self.restore(&snapshot);
        self.autosave.arm(now);
        true
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Duplicate the selection with a small offset. Returns the clone ids.
    pub fn duplicate_selected(&mut self, now: Instant) -> Vec<Uuid> {
        let clones = self.selection.duplicate(&mut self.scene);
        if !clones.is_empty() {
            self.commit(now);
        }
        clones
    }

    /// Delete the selection. Returns how many objects were removed.
    pub fn delete_selected(&mut self, now: Instant) -> usize {
        let removed = self.selection.delete(&mut self.scene);
        if removed > 0 {
            self.commit(now);
        }
        removed
    }

    /// Place a crop dragged in from the palette as an annotated icon group.
    ///
    /// Drops missing any required field are ignored entirely; internal
    /// reposition drags arrive through the same channel without the
    /// palette payload. A placed icon yields the position update to send.
    pub fn drop_planting(
        &mut self,
        drop: &PlantingDrop,
        point: Point,
        now: Instant,
    ) -> Option<PositionUpdate> {
        if drop.crop_id.is_empty() || drop.location_crop_id.is_empty() || drop.crop_name.is_empty()
        {
            return None;
        }
        let icon = planting_icon(drop, point);
        let id = self.scene.add(icon);
        self.selection.select_one(&self.scene, id);
        self.commit(now);
        Some(PositionUpdate {
            location_crop_id: drop.location_crop_id.clone(),
            x: point.x,
            y: point.y,
        })
    }

    /// Begin inline editing of a text label.
    pub fn begin_text_edit(&mut self, id: Uuid) -> bool {
        let editable = self
            .scene
            .get(id)
            .is_some_and(|obj| matches!(obj.shape, Shape::Text(_)));
        if editable {
            self.text_editing = Some(id);
        }
        editable
    }

    /// Finish inline editing, applying the new content if one was entered.
    pub fn finish_text_edit(&mut self, content: Option<String>, now: Instant) {
        let Some(id) = self.text_editing.take() else {
            return;
        };
        if let Some(content) = content {
            if let Some(object) = self.scene.get_mut(id) {
                if let Shape::Text(text) = &mut object.shape {
                    if text.content != content {
                        text.content = content;
                        self.commit(now);
                    }
                }
            }
        }
        if self.tools.current() == ToolKind::Text {
            self.set_tool(ToolKind::Select);
        }
    }

    /// Check the autosave debounce. Returns true when a save should run.
    pub fn autosave_due(&mut self, now: Instant) -> bool {
        self.autosave.poll(now)
    }

    /// Whether an autosave is pending.
    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_armed()
    }

    /// Record an edit: snapshot into history and arm the autosave.
    pub fn commit(&mut self, now: Instant) {
        if self.restoring {
            return;
        }
        self.record_snapshot();
        self.autosave.arm(now);
    }

    fn record_snapshot(&mut self) {
        match self.scene.snapshot_json() {
            Ok(snapshot) => self.history.record(snapshot),
            Err(err) => log::error!("scene snapshot failed: {err}"),
        }
    }

    fn restore(&mut self, snapshot: &str) {
        self.restoring = true;
        if let Err(err) = self.scene.apply_snapshot(snapshot) {
            log::error!("history restore failed: {err}");
        }
        apply_grid(&mut self.scene, &self.grid);
        self.scene
            .set_all_selectable(self.tools.current().objects_selectable());
        self.selection.prune(&self.scene);
        self.drag = None;
        self.text_editing = None;
        self.restoring = false;
    }

    fn select_at(&mut self, point: Point, modifiers: Modifiers) {
        let Some(id) = self.scene.hit_test_top(point) else {
            self.selection.clear();
            return;
        };
        if modifiers.primary || modifiers.shift {
            self.selection.toggle(&self.scene, id);
        } else if !self.selection.contains(id) {
            self.selection.select_one(&self.scene, id);
        }
        if self.selection.contains(id) {
            let grab = point - self.scene.get(id).map(|obj| obj.position()).unwrap_or(point);
            self.drag = Some(DragState {
                id,
                grab,
                moved: false,
            });
        }
    }
}

/// Build the icon group for a dropped crop: a rounded green card with the
/// crop name and, when known, the planting date.
fn planting_icon(drop: &PlantingDrop, point: Point) -> SceneObject {
    let center = Point::new(point.x + ICON_WIDTH / 2.0, point.y + ICON_HEIGHT / 2.0);
    let mut card = Rectangle::new(point, ICON_WIDTH, ICON_HEIGHT);
    card.corner_radius = ICON_CORNER_RADIUS;

    let mut children = vec![SceneObject::new(
        Shape::Rectangle(card),
        ObjectStyle::filled(ICON_FILL, ICON_FILL),
    )];

    let name = Text::new(Point::ZERO, drop.crop_name.clone()).with_font_size(ICON_NAME_SIZE);
    children.push(SceneObject::new(
        Shape::Text(center_label(name, center, -10.0)),
        ObjectStyle::stroke_only(ICON_NAME_COLOR),
    ));

    if !drop.planted_date.is_empty() {
        let date = Text::new(Point::ZERO, drop.planted_date.clone()).with_font_size(ICON_DATE_SIZE);
        children.push(SceneObject::new(
            Shape::Text(center_label(date, center, 8.0)),
            ObjectStyle::stroke_only(ICON_DATE_COLOR),
        ));
    }

    let tag = PlantingTag {
        crop_id: drop.crop_id.clone(),
        location_crop_id: drop.location_crop_id.clone(),
        crop_name: drop.crop_name.clone(),
        planted_date: if drop.planted_date.is_empty() {
            None
        } else {
            Some(drop.planted_date.clone())
        },
    };
    SceneObject::new(Shape::Group(Group::new(children)), ObjectStyle::stroke_only(ICON_FILL))
        .with_planting(tag)
}

/// Position a label so its center sits at the icon center plus a vertical
/// offset.
fn center_label(mut text: Text, center: Point, dy: f64) -> Text {
    let bounds = text.bounds();
    text.position = Point::new(
        center.x - bounds.width() / 2.0,
        center.y + dy - bounds.height() / 2.0,
    );
    text
}
