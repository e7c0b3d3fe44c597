//! Instrumented HTTP wrapper
//!
//! Wraps a `reqwest` client so every call signals the loading bus when it
//! starts and ends. The bus never awaits the request itself; it is only
//! told about the boundaries. Deliberately no retries, no circuit
//! breaking, no caching: the backend is relayed as-is and failures map to
//! a small error taxonomy.

mod error;

pub use error::FetchError;

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::bus::LoadingBus;
use crate::config::FetchConfig;

/// HTTP client that drives the loading bus around every request
pub struct InstrumentedClient {
    http: Client,
    bus: LoadingBus,
    min_visible: Duration,
}

impl InstrumentedClient {
    /// Create a new client from configuration
    pub fn from_config(config: &FetchConfig, bus: LoadingBus) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            http,
            bus,
            min_visible: config.min_visible(),
        })
    }

    /// A clone of the bus this client signals
    pub fn bus(&self) -> LoadingBus {
        self.bus.clone()
    }

    /// GET a URL and decode the JSON body
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, FetchError> {
        debug!(%url, "get_json: called");
        self.execute(self.http.get(url)).await
    }

    /// POST a JSON body to a URL and decode the JSON response
    pub async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value, FetchError> {
        debug!(%url, "post_json: called");
        self.execute(self.http.post(url).json(body)).await
    }

    /// Send a request with bus start/end signaling around it
    ///
    /// The guard ends the loading interval on every exit path; the
    /// minimum-visible window keeps the overlay from flickering when the
    /// backend answers quickly.
    async fn execute(&self, request: RequestBuilder) -> Result<serde_json::Value, FetchError> {
        let _guard = self.bus.guard(self.min_visible);

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "execute: backend error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let value = serde_json::from_str(&text)?;

        debug!("execute: success");
        Ok(value)
    }
}
