//! Active tool state and the pointer-driven drawing session.

use crate::scene::{Scene, SceneObject};
use crate::shapes::{Circle, Line, ObjectStyle, Rectangle, Shape, Text};
use kurbo::Point;
use uuid::Uuid;

/// Default stroke color for drawn shapes.
pub const DEFAULT_STROKE_COLOR: &str = "#4caf50";

/// Default fill color for drawn shapes (applied only when fill is enabled).
pub const DEFAULT_FILL_COLOR: &str = "#e8f5e9";

/// Which tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    /// Pick and move objects.
    #[default]
    Select,
    /// Drag out a rectangle.
    Rect,
    /// Drag out a circle.
    Circle,
    /// Drag out a line.
    Line,
    /// Place an editable text label.
    Text,
    /// Click an object to remove it.
    Delete,
}

impl ToolKind {
    /// Whether this tool creates shapes by dragging.
    pub fn is_drag_tool(self) -> bool {
        matches!(self, ToolKind::Rect | ToolKind::Circle | ToolKind::Line)
    }

    /// Whether switching to this tool keeps objects selectable.
    pub fn objects_selectable(self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Delete)
    }

    /// Map a bare key press to a tool, if it is a tool shortcut.
    pub fn from_shortcut(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            's' => Some(ToolKind::Select),
            'r' => Some(ToolKind::Rect),
            'c' => Some(ToolKind::Circle),
            'l' => Some(ToolKind::Line),
            't' => Some(ToolKind::Text),
            'd' => Some(ToolKind::Delete),
            _ => None,
        }
    }
}

/// An in-flight drag with a shape tool.
#[derive(Debug, Clone)]
struct DrawSession {
    anchor: Point,
    object: Uuid,
}

/// What a pointer-down did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawBegin {
    /// The active tool does not draw, or a session was already open.
    Ignored,
    /// A drag session started on the given object.
    Started(Uuid),
    /// The text tool placed a label (no drag follows).
    TextCreated(Uuid),
}

/// Tracks the active tool, the shape colors, and the current drag.
///
/// Drag tools insert a zero-size object on pointer-down and mutate its
/// geometry on every move, so the scene always reflects the drag in
/// progress. The finished object is committed on pointer-up.
#[derive(Debug)]
pub struct ToolManager {
    current: ToolKind,
    session: Option<DrawSession>,
    /// Stroke color applied to newly drawn shapes.
    pub stroke_color: String,
    /// Fill color applied to newly drawn shapes when fill is enabled.
    pub fill_color: String,
    /// Whether new shapes get a fill.
    pub fill_enabled: bool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    /// Create a tool manager with the select tool active.
    pub fn new() -> Self {
        Self {
            current: ToolKind::Select,
            session: None,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            fill_enabled: false,
        }
    }

    /// The active tool.
    pub fn current(&self) -> ToolKind {
        self.current
    }

    /// Switch tools. An in-flight drag is abandoned, removing its object.
    pub fn set_current(&mut self, tool: ToolKind, scene: &mut Scene) {
        if let Some(session) = self.session.take() {
            scene.remove(session.object);
        }
        self.current = tool;
    }

    /// Whether a drag session is open.
    pub fn is_drawing(&self) -> bool {
        self.session.is_some()
    }

    /// Style for the next drawn shape.
    pub fn draw_style(&self) -> ObjectStyle {
        if self.fill_enabled {
            ObjectStyle::filled(self.stroke_color.clone(), self.fill_color.clone())
        } else {
            ObjectStyle::stroke_only(self.stroke_color.clone())
        }
    }

    /// Handle pointer-down for the active tool.
    ///
    /// Draws use raw pointer coordinates; grid snapping applies to moving
    /// existing objects, not to drawing new ones.
    pub fn begin(&mut self, scene: &mut Scene, pointer: Point) -> DrawBegin {
        if self.session.is_some() {
            return DrawBegin::Ignored;
        }
        let anchor = pointer;
        let shape = match self.current {
            ToolKind::Rect => Shape::Rectangle(Rectangle::new(anchor, 0.0, 0.0)),
            ToolKind::Circle => Shape::Circle(Circle::new(anchor, 0.0)),
            ToolKind::Line => Shape::Line(Line::new(anchor, anchor)),
            ToolKind::Text => {
                let id = scene.add(SceneObject::new(
                    Shape::Text(Text::placeholder(anchor)),
                    ObjectStyle::stroke_only(self.stroke_color.clone()),
                ));
                return DrawBegin::TextCreated(id);
            }
            ToolKind::Select | ToolKind::Delete => return DrawBegin::Ignored,
        };
        let id = scene.add(SceneObject::new(shape, self.draw_style()));
        self.session = Some(DrawSession { anchor, object: id });
        DrawBegin::Started(id)
    }

    /// Handle pointer-move while a drag session is open.
    pub fn update(&mut self, scene: &mut Scene, pointer: Point) {
        let Some(session) = &self.session else {
            return;
        };
        let anchor = session.anchor;
        let Some(object) = scene.get_mut(session.object) else {
            return;
        };
        match &mut object.shape {
            Shape::Rectangle(rect) => {
                let dragged = Rectangle::from_drag(anchor, pointer);
                rect.position = dragged.position;
                rect.width = dragged.width;
                rect.height = dragged.height;
            }
            Shape::Circle(circle) => {
                // The anchor stays the top-left corner while the radius grows.
                let dx = pointer.x - anchor.x;
                let dy = pointer.y - anchor.y;
                circle.radius = (dx * dx + dy * dy).sqrt();
            }
            Shape::Line(line) => {
                line.end = pointer;
            }
            Shape::Text(_) | Shape::Group(_) => {}
        }
    }

    /// Handle pointer-up. Returns the finished object's id, if a drag was open.
    pub fn finish(&mut self) -> Option<Uuid> {
        self.session.take().map(|session| session.object)
    }
}
