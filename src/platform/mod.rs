//! OS backend selection.
//!
//! Each function returns the backend for the current target. Acquisition of long-lived handles (GPU accelerator,
//! Metal command queue) happens here, once; absence is reported as `None` and logged.
//!
//! | Target | CPU | Memory | GPU counter | GPU timing | Battery |
//! |---|---|---|---|---|---|
//! | macOS | `host_processor_info` | `host_statistics64` | `IOAccelerator` | Metal | IOPowerSources |
//! | Linux | `/proc/stat` | `/proc/meminfo` | DRM `gpu_busy_percent` | - | `/sys/class/power_supply` |
//! | other | - | - | - | - | - |

pub mod procfs;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub mod unsupported;

use tracing::warn;

use crate::battery::PowerSourceProvider;
use crate::cpu::CpuTickSource;
use crate::gpu::{CommandQueueTimer, GpuStrategyPreference, UtilizationCounter};
use crate::memory::VmStatsSource;

/// Backends for one [`SystemSampler`](crate::scheduler::SystemSampler).
pub struct Sources {
    pub cpu: Box<dyn CpuTickSource>,
    pub memory: Box<dyn VmStatsSource>,
    pub gpu_counter: Option<Box<dyn UtilizationCounter>>,
    pub gpu_timer: Option<Box<dyn CommandQueueTimer>>,
    pub power: Box<dyn PowerSourceProvider>,
}

impl Sources {
    /// Acquires the backends for the current target. GPU handles are only acquired when `gpu` may use them.
    pub fn detect(gpu: GpuStrategyPreference) -> Self {
        let (gpu_counter, gpu_timer) = match gpu {
            GpuStrategyPreference::Auto => (utilization_counter(), command_queue_timer()),
            GpuStrategyPreference::Counter => (utilization_counter(), None),
            GpuStrategyPreference::Timing => (None, command_queue_timer()),
            GpuStrategyPreference::Disabled => (None, None),
        };

        Self { cpu: cpu_tick_source(), memory: vm_stats_source(), gpu_counter, gpu_timer, power: power_source_provider() }
    }
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources")
            .field("gpu_counter", &self.gpu_counter.is_some())
            .field("gpu_timer", &self.gpu_timer.is_some())
            .finish_non_exhaustive()
    }
}

pub fn cpu_tick_source() -> Box<dyn CpuTickSource> {
    #[cfg(target_os = "macos")]
    return Box::new(macos::MachProcessorTicks::new());
    #[cfg(target_os = "linux")]
    return Box::new(linux::ProcStat::new());
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    return Box::new(unsupported::Unsupported);
}

pub fn vm_stats_source() -> Box<dyn VmStatsSource> {
    #[cfg(target_os = "macos")]
    return Box::new(macos::MachVmStats::new());
    #[cfg(target_os = "linux")]
    return Box::new(linux::ProcMeminfo::new());
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    return Box::new(unsupported::Unsupported);
}

/// The first accelerator's utilization counter, if the machine has one.
pub fn utilization_counter() -> Option<Box<dyn UtilizationCounter>> {
    #[cfg(target_os = "macos")]
    return match crate::iokit::AcceleratorHandle::open() {
        Ok(Some(handle)) => Some(Box::new(handle)),
        Ok(None) => {
            warn!(service = crate::iokit::ACCELERATOR_SERVICE, "no GPU accelerator found");
            None
        },
        Err(e) => {
            warn!(operation = "IOServiceGetMatchingServices", error = %e, "GPU accelerator lookup failed");
            None
        },
    };

    #[cfg(target_os = "linux")]
    return match linux::DrmBusyPercent::detect() {
        Some(counter) => Some(Box::new(counter)),
        None => {
            warn!("no DRM card exposes gpu_busy_percent");
            None
        },
    };

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        warn!("GPU utilization is not supported on this platform");
        None
    }
}

/// A command queue on the default GPU device, if one can be opened.
pub fn command_queue_timer() -> Option<Box<dyn CommandQueueTimer>> {
    #[cfg(target_os = "macos")]
    return match macos::MetalCommandQueueTimer::open() {
        Some(timer) => Some(Box::new(timer)),
        None => {
            warn!("no Metal device available");
            None
        },
    };

    #[cfg(not(target_os = "macos"))]
    None
}

pub fn power_source_provider() -> Box<dyn PowerSourceProvider> {
    #[cfg(target_os = "macos")]
    return Box::new(crate::iokit::IoPowerSources::new());
    #[cfg(target_os = "linux")]
    return Box::new(linux::SysfsPowerSupply::new());
    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    return Box::new(unsupported::Unsupported);
}
