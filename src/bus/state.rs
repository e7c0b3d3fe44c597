//! Bus state snapshot types
//!
//! Pure data. The visibility rule lives here so every consumer derives it
//! the same way: the overlay shows while any operation is in flight OR any
//! minimum-visible deadline is still in the future.

use tokio::time::Instant;

/// Opaque handle returned by `request_start`
///
/// Wraps the deadline before which the overlay must stay visible for the
/// operation that created it. Pass it back to `request_end` when the
/// operation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HideUntil(Instant);

impl HideUntil {
    pub(crate) fn new(instant: Instant) -> Self {
        Self(instant)
    }

    /// The deadline this handle represents
    pub fn instant(&self) -> Instant {
        self.0
    }
}

/// Snapshot of the bus state delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    /// Number of operations currently in flight (never negative)
    pub active: usize,

    /// Latest minimum-visible deadline still recorded, if any
    pub next_hide_at: Option<Instant>,
}

impl LoadingState {
    /// The idle state: nothing in flight, no pending deadlines
    pub fn idle() -> Self {
        Self {
            active: 0,
            next_hide_at: None,
        }
    }

    /// Whether the overlay should be visible at the given time
    pub fn visible_at(&self, now: Instant) -> bool {
        self.active > 0 || self.next_hide_at.is_some_and(|hide_at| now < hide_at)
    }

    /// Whether the overlay should be visible right now
    pub fn visible(&self) -> bool {
        self.visible_at(Instant::now())
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_idle_state_not_visible() {
        let state = LoadingState::idle();
        assert!(!state.visible());
    }

    #[test]
    fn test_visible_while_active() {
        let state = LoadingState {
            active: 1,
            next_hide_at: None,
        };
        assert!(state.visible());
    }

    #[test]
    fn test_visible_while_deadline_pending() {
        let now = Instant::now();
        let state = LoadingState {
            active: 0,
            next_hide_at: Some(now + Duration::from_secs(10)),
        };
        assert!(state.visible_at(now));
    }

    #[test]
    fn test_not_visible_after_deadline() {
        let now = Instant::now();
        let state = LoadingState {
            active: 0,
            next_hide_at: Some(now),
        };
        // Deadline exactly now counts as elapsed
        assert!(!state.visible_at(now));
        assert!(!state.visible_at(now + Duration::from_millis(1)));
    }

    #[test]
    fn test_hide_until_ordering() {
        let now = Instant::now();
        let early = HideUntil::new(now + Duration::from_millis(100));
        let late = HideUntil::new(now + Duration::from_millis(200));
        assert!(early < late);
        assert_eq!(early.instant(), now + Duration::from_millis(100));
    }
}
