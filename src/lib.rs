//! Host Sampler - periodic CPU, memory, GPU and battery utilization
//!
//! This crate polls the operating system for instantaneous utilization figures, turns raw kernel and driver counters
//! into normalized percentages, and publishes them as one [`Snapshot`] per tick to in-process consumers.
//!
//! # Features
//!
//! - **CPU**: average utilization across logical cores from per-core tick deltas
//! - **Memory**: active, wired and compressed pages as a share of physical memory
//! - **GPU**: accelerator utilization counter, or command-queue timing, degrading to 0 when absent
//! - **Battery**: charge of the first power source, 100 on machines without a battery
//! - **Scheduler**: fixed-interval driver with no overlapping ticks and a subscribe/unsubscribe publisher
//!
//! macOS uses Mach, IOKit, IOPowerSources and Metal. Linux reads `/proc` and sysfs. Other targets report zeros.
//!
//! # Examples
//!
//! One-off sampling without a runtime:
//!
//! ```no_run
//! use host_sampler::prelude::*;
//!
//! let mut sampler = SystemSampler::new(&MonitorConfig::default());
//! sampler.sample(); // establishes the CPU baseline
//! std::thread::sleep(std::time::Duration::from_secs(1));
//! let snapshot = sampler.sample();
//! println!("{snapshot} (dominant: {})", snapshot.dominant_load());
//! ```
//!
//! # Error Handling
//!
//! Sampling never fails: a failed OS query reads as 0 for that metric on that tick and is logged through `tracing`.
//! [`Error`] surfaces only from configuration and from the backend traits themselves:
//!
//! ```rust
//! use host_sampler::config::MonitorConfig;
//! use host_sampler::Error;
//!
//! let err = MonitorConfig::from_json_str(r#"{ "interval_ms": 5 }"#).unwrap_err();
//! assert!(matches!(err, Error::InvalidConfig(_)));
//! ```
//!
//! # Safety
//!
//! The macOS backends call Mach, IOKit, CoreFoundation and Metal directly. Every OS-owned handle is wrapped in an
//! owning type that releases it exactly once on drop, and a null or absent handle is never dereferenced.

#![doc(html_root_url = "https://docs.rs/host-sampler/0.1.0")]

pub mod battery;
pub mod config;
pub mod core;
pub mod cpu;
pub mod error;
pub mod gpu;
#[cfg(target_os = "macos")]
pub mod iokit;
pub mod memory;
pub mod platform;
pub mod scheduler;
pub mod snapshot;

#[cfg(target_os = "macos")]
mod utils;

pub use error::{Error, Result};
pub use snapshot::{LoadKind, Snapshot};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::battery::{BatterySampler, PowerSourceInfo, PowerSourceProvider};
    pub use crate::config::MonitorConfig;
    pub use crate::core::types::Percentage;
    pub use crate::cpu::{CoreTicks, CpuSampler, CpuTickSource};
    pub use crate::gpu::{CommandQueueTimer, GpuSampler, GpuStrategy, GpuStrategyPreference, UtilizationCounter};
    pub use crate::memory::{MemoryInfo, MemorySampler, VmStatistics, VmStatsSource};
    pub use crate::platform::Sources;
    pub use crate::scheduler::{Scheduler, SnapshotPublisher, SubscriptionId, SystemSampler, TickStats};
    pub use crate::snapshot::{LoadKind, Snapshot};
    pub use crate::{Error, Result};
}
