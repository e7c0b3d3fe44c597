//! Loading coordination bus
//!
//! Tracks overlapping loading operations from independent call sites and
//! computes a single shared visibility signal for the overlay:
//!
//! - [`LoadingBus`] - count/deadline aggregator with subscribe/notify
//! - [`LoadingState`] - snapshot delivered to subscribers
//! - [`LoadGuard`] - RAII start/end pairing
//! - [`HideUntil`] - opaque handle returned by `request_start`

mod core;
mod guard;
mod state;

pub use core::{LoadingBus, Subscription};
pub use guard::LoadGuard;
pub use state::{HideUntil, LoadingState};
