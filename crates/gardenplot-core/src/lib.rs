//! GardenPlot Core Library
//!
//! Headless editing core for the garden layout canvas: scene graph, tools,
//! selection, undo history, grid snapping, and the persistence bridge to
//! the layout API. Hosts feed it pointer and keyboard events in canvas
//! coordinates and drive autosave from their own clock.

pub mod editor;
pub mod grid;
pub mod history;
pub mod input;
pub mod remote;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod tools;
pub mod viewport;

pub use editor::{Editor, EditorRequest, PlantingDrop};
pub use grid::{apply_grid, GridSettings, DEFAULT_GRID_SIZE};
pub use history::{History, MAX_HISTORY};
pub use input::{Command, Key, Modifiers};
pub use remote::{
    HttpRemote, MemoryRemote, PersistenceBridge, PositionUpdate, RemoteError, RemoteStore,
    SaveStatus, AUTOSAVE_DELAY,
};
pub use scene::{PlantingTag, Scene, SceneDocument, SceneObject};
pub use selection::Selection;
pub use shapes::{ObjectStyle, Shape};
pub use tools::{ToolKind, ToolManager};
pub use viewport::Viewport;
