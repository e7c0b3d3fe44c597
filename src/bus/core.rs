//! LoadingBus - shared loading-indicator coordination
//!
//! The bus aggregates overlapping "show the loader" requests from
//! independent call sites into a single visibility signal. It is
//! count-based, not boolean: the overlay stays up while any request is in
//! flight or inside its minimum-visible window.
//!
//! The bus is constructed once by the composition root and cloned into
//! every producer and consumer; clones share state through an `Arc`.
//! Mutations are synchronous and cannot fail. The only timer-driven
//! mutation is `sweep_elapsed`, invoked by the [`LoadingProvider`] on a
//! periodic interval.
//!
//! [`LoadingProvider`]: crate::provider::LoadingProvider

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

use super::guard::LoadGuard;
use super::state::{HideUntil, LoadingState};

/// Internal mutable state: in-flight count plus pending deadlines
struct BusState {
    active: usize,
    deadlines: Vec<Instant>,
}

impl BusState {
    fn snapshot(&self) -> LoadingState {
        LoadingState {
            active: self.active,
            next_hide_at: self.deadlines.iter().max().copied(),
        }
    }
}

pub(crate) struct BusInner {
    state: Mutex<BusState>,
    subscribers: Mutex<HashMap<Uuid, mpsc::UnboundedSender<LoadingState>>>,
}

/// Shared loading-indicator coordination bus
///
/// Cloneable; all clones observe and mutate the same state.
#[derive(Clone)]
pub struct LoadingBus {
    inner: Arc<BusInner>,
}

impl LoadingBus {
    /// Create a new bus with no in-flight operations
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                state: Mutex::new(BusState {
                    active: 0,
                    deadlines: Vec::new(),
                }),
                subscribers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Record the start of a loading operation
    ///
    /// Increments the in-flight count and records a deadline of
    /// `now + min_visible` before which the overlay must not hide, even if
    /// the operation finishes early. Returns the deadline as a handle to
    /// pass back to [`request_end`].
    ///
    /// [`request_end`]: LoadingBus::request_end
    pub fn request_start(&self, min_visible: Duration) -> HideUntil {
        let hide_at = Instant::now() + min_visible;
        let snapshot = {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.active += 1;
            state.deadlines.push(hide_at);
            state.snapshot()
        };
        debug!(active = snapshot.active, ?min_visible, "request_start");
        self.notify(snapshot);
        HideUntil::new(hide_at)
    }

    /// Record the end of a loading operation
    ///
    /// Decrements the in-flight count with a floor at zero, so unmatched
    /// calls are harmless. The handle's deadline is deliberately left in
    /// place: the periodic sweep purges it once elapsed, which is what
    /// keeps the overlay up for its minimum window when the operation
    /// finished early.
    pub fn request_end(&self, handle: HideUntil) {
        let snapshot = {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.active = state.active.saturating_sub(1);
            state.snapshot()
        };
        debug!(active = snapshot.active, hide_at = ?handle.instant(), "request_end");
        self.notify(snapshot);
    }

    /// Purge deadlines whose time has passed
    ///
    /// Subscribers are notified only when something was actually removed;
    /// no-op sweeps are silent. Must be driven by a periodic timer, since
    /// no other event marks the passage of a deadline.
    pub fn sweep_elapsed(&self) {
        let now = Instant::now();
        let snapshot = {
            let mut state = self.inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            let before = state.deadlines.len();
            state.deadlines.retain(|deadline| *deadline > now);
            if state.deadlines.len() == before {
                None
            } else {
                Some(state.snapshot())
            }
        };
        if let Some(snapshot) = snapshot {
            debug!(active = snapshot.active, "sweep_elapsed: deadlines purged");
            self.notify(snapshot);
        }
    }

    /// Current state snapshot
    pub fn snapshot(&self) -> LoadingState {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Whether the overlay should be visible right now
    pub fn is_visible(&self) -> bool {
        self.snapshot().visible()
    }

    /// Subscribe to state changes
    ///
    /// The current snapshot is delivered immediately. The subscription is
    /// removed when the returned handle is dropped. No ordering is
    /// guaranteed among multiple subscribers.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::now_v7();

        // Deliver the current state before the subscriber can miss a change
        let _ = tx.send(self.snapshot());

        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, tx);

        debug!(%id, "subscribe");
        Subscription {
            id,
            rx,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Start an operation and tie its end to a guard's lifetime
    pub fn guard(&self, min_visible: Duration) -> LoadGuard {
        LoadGuard::new(self.clone(), min_visible)
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, snapshot: LoadingState) {
        let mut subscribers = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Drop subscribers whose receiver has gone away
        subscribers.retain(|_, tx| tx.send(snapshot).is_ok());
    }
}

impl Default for LoadingBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Live subscription to bus state changes
///
/// Dropping the subscription unregisters it from the bus.
pub struct Subscription {
    id: Uuid,
    rx: mpsc::UnboundedReceiver<LoadingState>,
    inner: Weak<BusInner>,
}

impl Subscription {
    /// Wait for the next state delivery
    ///
    /// Returns `None` once the bus has been dropped and all queued
    /// deliveries have been consumed.
    pub async fn changed(&mut self) -> Option<LoadingState> {
        self.rx.recv().await
    }

    /// Take the next queued delivery without waiting, if any
    pub fn try_changed(&mut self) -> Option<LoadingState> {
        self.rx.try_recv().ok()
    }

    /// Drain queued deliveries and return the most recent, if any
    pub fn latest(&mut self) -> Option<LoadingState> {
        let mut latest = None;
        while let Ok(state) = self.rx.try_recv() {
            latest = Some(state);
        }
        latest
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .subscribers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&self.id);
        }
    }
}
