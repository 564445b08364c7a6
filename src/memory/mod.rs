//! Memory utilization module
//!
//! Reads virtual-memory page statistics and reports the share of physical memory held by active, wired and
//! compressed pages. Inactive and free pages are reported in [`MemoryInfo`] but do not count as used.
//!
//! The sampler retains no state between ticks apart from the physical memory size, which is read once and cached.
//!
//! # Examples
//!
//! ```no_run
//! use host_sampler::memory::MemorySampler;
//! use host_sampler::platform;
//!
//! let memory = MemorySampler::new(platform::vm_stats_source());
//! println!("Memory Usage: {:.1}%", memory.sample().as_f64());
//!
//! if let Ok(info) = memory.memory_info() {
//!     println!("Used: {} of {} bytes", info.used, info.total);
//! }
//! ```

mod sampler;
mod types;

pub use sampler::*;
pub use types::*;

use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Provider of virtual-memory statistics.
#[cfg_attr(test, automock)]
pub trait VmStatsSource: Send {
    /// Current page counts and page size.
    fn vm_statistics(&self) -> Result<VmStatistics>;

    /// Installed physical memory in bytes.
    fn physical_memory(&self) -> Result<u64>;
}

#[cfg(test)]
mod tests;
