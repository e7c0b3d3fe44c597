//! loadbus - shared loading-indicator coordination
//!
//! A count-based loading coordination bus for async terminal frontends.
//! Independent call sites report when loading operations start and end;
//! the bus aggregates them into a single visibility signal with a
//! per-operation minimum-visible window so the overlay never flickers on
//! fast operations.
//!
//! # Core Concepts
//!
//! - **Count-based, not boolean**: the overlay stays up while any one of
//!   several overlapping operations is still pending
//! - **Minimum-visible window**: each start records a deadline before
//!   which the overlay must not hide, even if the operation finishes early
//! - **Timer-driven sweep**: expired deadlines are purged only by a
//!   periodic sweep; nothing else signals elapsed time
//!
//! # Modules
//!
//! - [`bus`] - the coordination bus, snapshots, and RAII guards
//! - [`provider`] - the sweep timer loop that drives deadline purging
//! - [`fetch`] - instrumented HTTP wrapper signaling the bus per request
//! - [`tui`] - overlay widget, page-load sentry, and demo runner
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod bus;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod provider;
pub mod tui;

// Re-export commonly used types
pub use bus::{HideUntil, LoadGuard, LoadingBus, LoadingState, Subscription};
pub use config::{Config, FetchConfig, SweepConfig, TuiConfig};
pub use fetch::{FetchError, InstrumentedClient};
pub use provider::{LoadingProvider, ProviderRequest};
pub use tui::PageLoadSentry;
