//! LoadingProvider - periodic sweep driver for the bus
//!
//! The provider owns the only timer-driven mutation in the system: a
//! periodic tick that calls [`LoadingBus::sweep_elapsed`] so expired
//! minimum-visible deadlines get purged. Nothing else signals elapsed
//! time, so the hide transition can lag the deadline by up to one sweep
//! interval; that approximation is deliberate.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::bus::LoadingBus;
use crate::config::SweepConfig;

/// Requests accepted by a running provider
#[derive(Debug)]
pub enum ProviderRequest {
    /// Sweep immediately instead of waiting for the next tick
    SweepNow,
    /// Stop the provider loop
    Shutdown,
}

/// Owns the sweep timer for a [`LoadingBus`]
pub struct LoadingProvider {
    bus: LoadingBus,
    config: SweepConfig,
    tx: mpsc::Sender<ProviderRequest>,
    rx: mpsc::Receiver<ProviderRequest>,
}

impl LoadingProvider {
    /// Create a provider for the given bus
    pub fn new(bus: LoadingBus, config: SweepConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_buffer);
        Self { bus, config, tx, rx }
    }

    /// A clone of the bus this provider sweeps
    pub fn bus(&self) -> LoadingBus {
        self.bus.clone()
    }

    /// Get a sender for issuing requests to the running provider
    pub fn sender(&self) -> mpsc::Sender<ProviderRequest> {
        self.tx.clone()
    }

    /// Run one sweep pass directly (useful for testing)
    pub fn sweep_once(&self) {
        self.bus.sweep_elapsed();
    }

    /// Run the sweep loop
    ///
    /// Consumes the provider and runs until a `Shutdown` request arrives
    /// or every sender has been dropped.
    pub async fn run(self) {
        let Self {
            bus,
            config,
            tx,
            mut rx,
        } = self;
        // Drop the internal sender so the channel closes once every
        // handed-out sender is gone
        drop(tx);

        let mut ticker = tokio::time::interval(config.interval());

        info!(interval_ms = config.interval_ms, "LoadingProvider started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    bus.sweep_elapsed();
                }
                req = rx.recv() => match req {
                    Some(ProviderRequest::SweepNow) => {
                        debug!("LoadingProvider: sweep requested");
                        bus.sweep_elapsed();
                    }
                    Some(ProviderRequest::Shutdown) | None => {
                        info!("LoadingProvider shutting down");
                        break;
                    }
                },
            }
        }
    }
}
