//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main loadbus configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sweep timer configuration
    pub sweep: SweepConfig,

    /// Instrumented HTTP client configuration
    pub fetch: FetchConfig,

    /// TUI demo configuration
    pub tui: TuiConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .loadbus.yml
        let local_config = PathBuf::from(".loadbus.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/loadbus/loadbus.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("loadbus").join("loadbus.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Sweep timer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Sweep interval in milliseconds
    #[serde(rename = "interval-ms")]
    pub interval_ms: u64,

    /// Channel buffer size for provider requests
    #[serde(rename = "channel-buffer")]
    pub channel_buffer: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_ms: 250,
            channel_buffer: 16,
        }
    }
}

impl SweepConfig {
    /// Get the sweep interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Instrumented HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Minimum time the overlay stays visible per request, in milliseconds
    #[serde(rename = "min-visible-ms")]
    pub min_visible_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            min_visible_ms: 400,
        }
    }
}

impl FetchConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get the minimum-visible window as a Duration
    pub fn min_visible(&self) -> Duration {
        Duration::from_millis(self.min_visible_ms)
    }
}

/// TUI demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Event poll / redraw tick in milliseconds
    #[serde(rename = "tick-ms")]
    pub tick_ms: u64,

    /// Minimum-visible window for mount sentries, in milliseconds
    #[serde(rename = "min-visible-ms")]
    pub min_visible_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            min_visible_ms: 400,
        }
    }
}

impl TuiConfig {
    /// Get the tick rate as a Duration
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the sentry minimum-visible window as a Duration
    pub fn min_visible(&self) -> Duration {
        Duration::from_millis(self.min_visible_ms)
    }
}
