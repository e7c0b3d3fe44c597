//! Page-load sentry
//!
//! Mount-triggered bus consumer: constructing a sentry registers a loading
//! interval ("mount"), dropping it releases the interval ("unmount"). A
//! view that needs the overlay for its whole lifetime holds one of these
//! instead of calling the bus directly.

use std::time::Duration;

use tracing::debug;

use crate::bus::{LoadGuard, LoadingBus};

/// Holds a loading interval open while a view is mounted
pub struct PageLoadSentry {
    _guard: LoadGuard,
}

impl PageLoadSentry {
    /// Register a loading interval for the lifetime of the sentry
    pub fn new(bus: &LoadingBus, min_visible: Duration) -> Self {
        debug!(?min_visible, "PageLoadSentry mounted");
        Self {
            _guard: bus.guard(min_visible),
        }
    }
}
