//! RAII pairing of request_start/request_end

use std::time::Duration;

use tracing::debug;

use super::core::LoadingBus;
use super::state::HideUntil;

/// Guard that holds a loading interval open for its lifetime
///
/// Created via [`LoadingBus::guard`]. The interval starts on construction
/// and ends when the guard is dropped, on every exit path. The
/// minimum-visible window still applies after the drop.
pub struct LoadGuard {
    bus: LoadingBus,
    handle: HideUntil,
}

impl LoadGuard {
    pub(crate) fn new(bus: LoadingBus, min_visible: Duration) -> Self {
        let handle = bus.request_start(min_visible);
        Self { bus, handle }
    }

    /// The deadline before which the overlay stays visible
    pub fn hide_until(&self) -> HideUntil {
        self.handle
    }
}

impl Drop for LoadGuard {
    fn drop(&mut self) {
        debug!(hide_at = ?self.handle.instant(), "LoadGuard dropped");
        self.bus.request_end(self.handle);
    }
}
