//! In-memory remote store for tests and offline use.

use super::{BoxFuture, PositionUpdate, RemoteError, RemoteResult, RemoteStore};
use crate::scene::SceneDocument;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// Remote store keeping layouts in a map.
///
/// Records every position update and counts saves, and can be switched into
/// a failing mode, which makes it the workhorse of the persistence tests.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    layouts: RwLock<HashMap<String, SceneDocument>>,
    position_updates: RwLock<Vec<(String, PositionUpdate)>>,
    save_count: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryRemote {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a layout for a context.
    pub fn seed(&self, context: impl Into<String>, document: SceneDocument) {
        self.layouts
            .write()
            .expect("layouts lock poisoned")
            .insert(context.into(), document);
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves across all contexts.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Position updates received so far, with their context ids.
    pub fn position_updates(&self) -> Vec<(String, PositionUpdate)> {
        self.position_updates
            .read()
            .expect("updates lock poisoned")
            .clone()
    }

    /// The saved layout for a context, if any.
    pub fn layout(&self, context: &str) -> Option<SceneDocument> {
        self.layouts
            .read()
            .expect("layouts lock poisoned")
            .get(context)
            .cloned()
    }

    fn check_failing(&self) -> RemoteResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(RemoteError::Store("injected failure".into()))
        } else {
            Ok(())
        }
    }
}

impl RemoteStore for MemoryRemote {
    fn fetch_layout<'a>(
        &'a self,
        context: &'a str,
    ) -> BoxFuture<'a, RemoteResult<Option<SceneDocument>>> {
        Box::pin(async move {
            self.check_failing()?;
            let layout = self.layout(context).filter(|doc| !doc.objects.is_empty());
            Ok(layout)
        })
    }

    fn save_layout<'a>(
        &'a self,
        context: &'a str,
        document: &'a SceneDocument,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            self.check_failing()?;
            self.layouts
                .write()
                .expect("layouts lock poisoned")
                .insert(context.to_string(), document.clone());
            self.save_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn update_position<'a>(
        &'a self,
        context: &'a str,
        update: &'a PositionUpdate,
    ) -> BoxFuture<'a, RemoteResult<()>> {
        Box::pin(async move {
            self.check_failing()?;
            self.position_updates
                .write()
                .expect("updates lock poisoned")
                .push((context.to_string(), update.clone()));
            Ok(())
        })
    }
}
