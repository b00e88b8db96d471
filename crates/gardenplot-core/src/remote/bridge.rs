//! Debounced autosave and save-status tracking over a remote store.

use super::{PositionUpdate, RemoteResult, RemoteStore};
use crate::scene::SceneDocument;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Delay between the last edit and the autosave it triggers.
pub const AUTOSAVE_DELAY: Duration = Duration::from_secs(3);

/// How long the saved/failed indicator stays up before clearing.
pub const INDICATOR_CLEAR_DELAY: Duration = Duration::from_secs(2);

/// Debounce timer for autosave.
///
/// Every edit re-arms the timer, so the save fires only after the canvas
/// has been quiet for the full delay. Time is passed in explicitly so the
/// timer is deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct AutosaveTimer {
    deadline: Option<Instant>,
    delay: Duration,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self::new(AUTOSAVE_DELAY)
    }
}

impl AutosaveTimer {
    /// Create a timer with the given debounce delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            deadline: None,
            delay,
        }
    }

    /// Arm (or re-arm) the timer. Re-arming pushes the deadline back.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a save is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check the timer. Returns true exactly once when the deadline passes.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Save indicator state shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Nothing in flight, nothing to show.
    #[default]
    Idle,
    /// A save request is in flight.
    Saving,
    /// The last save succeeded.
    Saved,
    /// The last save failed.
    Failed,
}

#[derive(Debug, Default)]
struct StatusState {
    status: SaveStatus,
    clear_at: Option<Instant>,
}

/// Connects the editor to a remote store: load, save with status tracking,
/// and fire-and-forget position updates.
///
/// Saves can overlap when the user keeps editing; a generation counter
/// makes the status reflect the most recently started save, so a slow stale
/// response never overwrites a newer result.
#[derive(Debug)]
pub struct PersistenceBridge<S: RemoteStore> {
    store: Arc<S>,
    context: String,
    state: Mutex<StatusState>,
    generation: AtomicU64,
}

impl<S: RemoteStore> PersistenceBridge<S> {
    /// Create a bridge for one context (garden).
    pub fn new(store: Arc<S>, context: impl Into<String>) -> Self {
        Self {
            store,
            context: context.into(),
            state: Mutex::new(StatusState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// The context id this bridge saves under.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Fetch the saved layout, if any.
    pub async fn load(&self) -> RemoteResult<Option<SceneDocument>> {
        self.store.fetch_layout(&self.context).await
    }

    /// Save the layout, tracking the indicator through saving and outcome.
    pub async fn save(&self, document: &SceneDocument) -> RemoteResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_status(SaveStatus::Saving, None);

        let result = self.store.save_layout(&self.context, document).await;

        // Only the most recently started save owns the indicator. Success
        // auto-clears; a failure stays up until the next save attempt.
        if self.generation.load(Ordering::SeqCst) == generation {
            if result.is_ok() {
                self.set_status(SaveStatus::Saved, Some(Instant::now() + INDICATOR_CLEAR_DELAY));
            } else {
                self.set_status(SaveStatus::Failed, None);
            }
        }
        if let Err(err) = &result {
            log::error!("layout save failed for {}: {err}", self.context);
        }
        result
    }

    /// Send a position update; failures are logged and dropped.
    pub async fn push_position(&self, update: &PositionUpdate) {
        if let Err(err) = self.store.update_position(&self.context, update).await {
            log::warn!(
                "position update failed for {} item {}: {err}",
                self.context,
                update.location_crop_id
            );
        }
    }

    /// Current indicator state, expiring saved/failed after their delay.
    pub fn poll_status(&self, now: Instant) -> SaveStatus {
        let mut state = self.state.lock().expect("status lock poisoned");
        if let Some(clear_at) = state.clear_at {
            if now >= clear_at {
                state.status = SaveStatus::Idle;
                state.clear_at = None;
            }
        }
        state.status
    }

    /// Current indicator state without expiry handling.
    pub fn status(&self) -> SaveStatus {
        self.state.lock().expect("status lock poisoned").status
    }

    fn set_status(&self, status: SaveStatus, clear_at: Option<Instant>) {
        let mut state = self.state.lock().expect("status lock poisoned");
        state.status = status;
        state.clear_at = clear_at;
    }
}

/// Drive a future to completion with a no-op waker.
///
/// Only suitable for futures that never actually wait, such as the
/// in-memory store's. Panics if the future returns pending twice without
/// making progress.
pub fn block_on<F: std::future::Future>(mut future: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn noop_raw_waker() -> RawWaker {
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        fn noop(_: *const ()) {}
        RawWaker::new(
            std::ptr::null(),
            &RawWakerVTable::new(clone, noop, noop, noop),
        )
    }

    // Safety: the vtable functions never dereference the data pointer.
    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut future = unsafe { std::pin::Pin::new_unchecked(&mut future) };
    for _ in 0..2 {
        if let Poll::Ready(value) = future.as_mut().poll(&mut cx) {
            return value;
        }
    }
    panic!("future did not complete; block_on is only for non-waiting futures");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryRemote;
    use crate::scene::{Scene, SceneObject};
    use crate::shapes::{ObjectStyle, Rectangle, Shape};
    use kurbo::Point;

    fn one_rect_document() -> SceneDocument {
        let mut scene = Scene::new();
        scene.add(SceneObject::new(
            Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0)),
            ObjectStyle::default(),
        ));
        scene.to_document()
    }

    #[test]
    fn timer_debounces() {
        let t0 = Instant::now();
        let mut timer = AutosaveTimer::default();
        assert!(!timer.poll(t0));

        timer.arm(t0);
        assert!(!timer.poll(t0 + Duration::from_secs(2)));
        // A new edit just before the deadline pushes it back.
        timer.arm(t0 + Duration::from_secs(2));
        assert!(!timer.poll(t0 + Duration::from_secs(4)));
        assert!(timer.poll(t0 + Duration::from_secs(5)));
        // Fires only once.
        assert!(!timer.poll(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn timer_cancel_disarms() {
        let t0 = Instant::now();
        let mut timer = AutosaveTimer::default();
        timer.arm(t0);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn save_updates_indicator_then_clears() {
        let bridge = PersistenceBridge::new(Arc::new(MemoryRemote::new()), "garden-1");
        assert_eq!(bridge.status(), SaveStatus::Idle);

        block_on(bridge.save(&one_rect_document())).unwrap();
        assert_eq!(bridge.status(), SaveStatus::Saved);

        // Still showing just before the clear delay, idle after.
        let now = Instant::now();
        assert_eq!(bridge.poll_status(now), SaveStatus::Saved);
        assert_eq!(bridge.poll_status(now + INDICATOR_CLEAR_DELAY), SaveStatus::Idle);
    }

    #[test]
    fn failed_save_indicator_persists_until_next_save() {
        let store = Arc::new(MemoryRemote::new());
        store.set_failing(true);
        let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
        assert!(block_on(bridge.save(&one_rect_document())).is_err());
        assert_eq!(bridge.status(), SaveStatus::Failed);
        // No auto-clear for failures, however long it sits.
        assert_eq!(
            bridge.poll_status(Instant::now() + Duration::from_secs(10)),
            SaveStatus::Failed
        );

        store.set_failing(false);
        block_on(bridge.save(&one_rect_document())).unwrap();
        assert_eq!(bridge.status(), SaveStatus::Saved);
    }

    #[test]
    fn position_failures_are_swallowed() {
        let store = Arc::new(MemoryRemote::new());
        store.set_failing(true);
        let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
        block_on(bridge.push_position(&PositionUpdate {
            location_crop_id: "12".into(),
            x: 200.0,
            y: 150.0,
        }));
        assert!(store.position_updates().is_empty());
        // The save indicator is untouched by position updates.
        assert_eq!(bridge.status(), SaveStatus::Idle);
    }

    #[test]
    fn load_round_trips_through_store() {
        let store = Arc::new(MemoryRemote::new());
        let bridge = PersistenceBridge::new(Arc::clone(&store), "garden-1");
        assert!(block_on(bridge.load()).unwrap().is_none());
        let doc = one_rect_document();
        block_on(bridge.save(&doc)).unwrap();
        assert_eq!(block_on(bridge.load()).unwrap(), Some(doc));
    }
}
