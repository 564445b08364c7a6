//! # GPU Module
//!
//! Best-effort GPU utilization. Two measurement strategies are supported and one is chosen when the sampler is
//! built:
//!
//! * **Counter**: reads a utilization counter the driver publishes for the first accelerator device.
//! * **Timing**: submits an empty unit of work to the device's command queue and relates its execution time to the
//!   wall-clock time elapsed since the previous sample.
//!
//! When neither strategy can be acquired the sampler stays [`GpuSampler::Unavailable`] for its whole lifetime and
//! reports 0 without touching the device again.
//!
//! ## Example
//!
//! ```no_run
//! use host_sampler::gpu::{GpuSampler, GpuStrategyPreference};
//! use host_sampler::platform;
//!
//! let mut gpu = GpuSampler::probe(
//!     GpuStrategyPreference::Auto,
//!     platform::utilization_counter(),
//!     platform::command_queue_timer(),
//! );
//! println!("strategy: {}, GPU: {:.1}%", gpu.strategy(), gpu.sample().as_f64());
//! ```

mod sampler;
mod timing;
mod types;

use std::time::Duration;

pub use sampler::*;
pub use timing::*;
pub use types::*;

use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Driver-published utilization counter of an accelerator device.
#[cfg_attr(test, automock)]
pub trait UtilizationCounter: Send {
    /// Current utilization in percent.
    ///
    /// `Ok(None)` means the device answered but does not publish the counter.
    fn utilization(&self) -> Result<Option<f64>>;
}

/// Command queue that can time a trivial submission.
#[cfg_attr(test, automock)]
pub trait CommandQueueTimer: Send {
    /// Submits an empty command buffer, waits for completion and returns the GPU execution time.
    fn time_noop_submission(&self) -> Result<Duration>;
}
