//! Sampler configuration.
//!
//! ```rust
//! use host_sampler::config::MonitorConfig;
//! use host_sampler::gpu::GpuStrategyPreference;
//!
//! let config = MonitorConfig::from_json_str(r#"{ "interval_ms": 2000, "gpu_strategy": "timing" }"#).unwrap();
//! assert_eq!(config.interval_ms, 2000);
//! assert_eq!(config.gpu_strategy, GpuStrategyPreference::Timing);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gpu::GpuStrategyPreference;

/// Default sampling interval (milliseconds)
pub const DEFAULT_UPDATE_INTERVAL_MS: u64 = 1000;

/// Minimum sampling interval (milliseconds)
pub const MIN_UPDATE_INTERVAL_MS: u64 = 100;

/// Maximum sampling interval (milliseconds)
pub const MAX_UPDATE_INTERVAL_MS: u64 = 10_000;

fn default_interval_ms() -> u64 {
    DEFAULT_UPDATE_INTERVAL_MS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorConfig {
    /// Time between two sampling ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default)]
    pub gpu_strategy: GpuStrategyPreference,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { interval_ms: DEFAULT_UPDATE_INTERVAL_MS, gpu_strategy: GpuStrategyPreference::default() }
    }
}

impl MonitorConfig {
    /// Parses and validates a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_UPDATE_INTERVAL_MS..=MAX_UPDATE_INTERVAL_MS).contains(&self.interval_ms) {
            return Err(Error::invalid_config(format!(
                "interval_ms must be between {} and {}, got {}",
                MIN_UPDATE_INTERVAL_MS, MAX_UPDATE_INTERVAL_MS, self.interval_ms
            )));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
