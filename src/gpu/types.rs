use std::fmt;

use serde::{Deserialize, Serialize};

/// Strategy requested when building a [`GpuSampler`](super::GpuSampler)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuStrategyPreference {
    /// Counter first, timing as fallback
    #[default]
    Auto,
    /// Counter strategy only
    Counter,
    /// Timing strategy only
    Timing,
    /// Never query the GPU
    Disabled,
}

/// Strategy in effect for a built sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GpuStrategy {
    Counter,
    Timing,
    Unavailable,
}

impl fmt::Display for GpuStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => write!(f, "counter"),
            Self::Timing => write!(f, "timing"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}
