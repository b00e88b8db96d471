//! Remote layout store: trait, HTTP client, and the persistence bridge.

mod bridge;
mod http;
mod memory;

pub use bridge::{
    block_on, AutosaveTimer, PersistenceBridge, SaveStatus, AUTOSAVE_DELAY, INDICATOR_CLEAR_DELAY,
};
pub use http::HttpRemote;
pub use memory::MemoryRemote;

use crate::scene::SceneDocument;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Boxed future used by [`RemoteStore`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors from the remote layout store.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),

    /// The layout payload could not be encoded or decoded.
    #[error("layout serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure injected or raised by an in-memory store.
    #[error("{0}")]
    Store(String),
}

/// Result alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// A position update for one placed item, sent fire-and-forget after a drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionUpdate {
    /// Placement identifier of the moved item.
    #[serde(rename = "locationCropId")]
    pub location_crop_id: String,
    /// New x coordinate on the canvas.
    pub x: f64,
    /// New y coordinate on the canvas.
    pub y: f64,
}

/// Backend holding saved layouts, keyed by a context id (the garden).
///
/// Methods return boxed futures so the trait stays object-safe and callers
/// can hold a `dyn RemoteStore` behind an `Arc`.
pub trait RemoteStore: Send + Sync {
    /// Fetch the saved layout for a context. `None` means no layout was
    /// ever saved and the editor starts blank.
    fn fetch_layout<'a>(&'a self, context: &'a str)
        -> BoxFuture<'a, RemoteResult<Option<SceneDocument>>>;

    /// Persist the layout for a context.
    fn save_layout<'a>(
        &'a self,
        context: &'a str,
        document: &'a SceneDocument,
    ) -> BoxFuture<'a, RemoteResult<()>>;

    /// Record a placed item's new position.
    fn update_position<'a>(
        &'a self,
        context: &'a str,
        update: &'a PositionUpdate,
    ) -> BoxFuture<'a, RemoteResult<()>>;
}
