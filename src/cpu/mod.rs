//! # CPU Module
//!
//! Whole-machine CPU utilization computed from per-core tick counters.
//!
//! The kernel exposes monotonically increasing `user`, `system`, `nice` and `idle` tick counts for every logical
//! core. A single reading says nothing about utilization; the [`CpuSampler`] keeps the previous reading and derives
//! usage from the delta between two consecutive samples.
//!
//! ## Example
//!
//! ```no_run
//! use host_sampler::cpu::CpuSampler;
//! use host_sampler::platform;
//!
//! let mut cpu = CpuSampler::new(platform::cpu_tick_source());
//! let _ = cpu.sample(); // first call establishes the baseline and reports 0
//! std::thread::sleep(std::time::Duration::from_secs(1));
//! println!("CPU: {:.1}%", cpu.sample().as_f64());
//! ```

mod sampler;
mod types;

pub use sampler::*;
pub use types::*;

use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Provider of raw per-core processor tick counters.
///
/// Implementations return one [`CoreTicks`] per logical core, in a stable core order.
#[cfg_attr(test, automock)]
pub trait CpuTickSource: Send {
    /// Reads the current tick counters for all logical cores.
    fn processor_ticks(&self) -> Result<Vec<CoreTicks>>;
}
