//! Battery charge module
//!
//! Reports the charge level of the first power source that publishes one. Machines without a battery report 100,
//! the convention for "no battery constraint".
//!
//! ```no_run
//! use host_sampler::battery::BatterySampler;
//! use host_sampler::platform;
//!
//! let battery = BatterySampler::new(platform::power_source_provider());
//! println!("Battery: {:.0}%", battery.sample().as_f64());
//! ```

pub mod constants;
mod types;

pub use types::*;

use tracing::debug;

use crate::core::types::Percentage;
use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Enumerates the system's power sources.
#[cfg_attr(test, automock)]
pub trait PowerSourceProvider: Send {
    fn power_sources(&self) -> Result<Vec<PowerSourceInfo>>;
}

/// Stateless battery sampler
pub struct BatterySampler {
    provider: Box<dyn PowerSourceProvider>,
}

impl BatterySampler {
    pub fn new(provider: Box<dyn PowerSourceProvider>) -> Self {
        Self { provider }
    }

    /// Charge of the first power source with a current capacity, clamped; 100 when there is none.
    pub fn sample(&self) -> Percentage {
        self.power_sources()
            .iter()
            .find_map(PowerSourceInfo::charge_percentage)
            .map(Percentage::from_f64)
            .unwrap_or(Percentage::FULL)
    }

    /// Raw enumeration. A failed enumeration is logged and reported as empty.
    pub fn power_sources(&self) -> Vec<PowerSourceInfo> {
        self.provider.power_sources().unwrap_or_else(|e| {
            debug!(operation = "power_sources", error = %e, "power source enumeration failed");
            Vec::new()
        })
    }
}

impl std::fmt::Debug for BatterySampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatterySampler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
