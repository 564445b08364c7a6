use std::time::SystemTime;

use tracing::debug;

use crate::battery::BatterySampler;
use crate::config::MonitorConfig;
use crate::cpu::CpuSampler;
use crate::gpu::{GpuSampler, GpuStrategyPreference};
use crate::memory::MemorySampler;
use crate::platform::Sources;
use crate::snapshot::Snapshot;

/// The four samplers of one host, run in sequence to produce a [`Snapshot`].
///
/// Usable on its own without an async runtime; [`Scheduler`](super::Scheduler) drives it periodically.
#[derive(Debug)]
pub struct SystemSampler {
    cpu: CpuSampler,
    memory: MemorySampler,
    gpu: GpuSampler,
    battery: BatterySampler,
}

impl SystemSampler {
    /// Acquires the platform backends and selects the GPU strategy.
    pub fn new(config: &MonitorConfig) -> Self {
        Self::with_sources(Sources::detect(config.gpu_strategy), config.gpu_strategy)
    }

    pub fn with_sources(sources: Sources, gpu_strategy: GpuStrategyPreference) -> Self {
        Self {
            cpu: CpuSampler::new(sources.cpu),
            memory: MemorySampler::new(sources.memory),
            gpu: GpuSampler::probe(gpu_strategy, sources.gpu_counter, sources.gpu_timer),
            battery: BatterySampler::new(sources.power),
        }
    }

    /// Runs every sampler once. Never fails; unavailable metrics read 0 (battery: 100).
    pub fn sample(&mut self) -> Snapshot {
        let cpu = self.cpu.sample();
        let memory = self.memory.sample();
        let gpu = self.gpu.sample();
        let battery = self.battery.sample();

        let snapshot = Snapshot::new(cpu, memory, gpu, battery, SystemTime::now());
        debug!(
            cpu = snapshot.cpu_percent(),
            memory = snapshot.memory_percent(),
            gpu = snapshot.gpu_percent(),
            battery = snapshot.battery_percent(),
            "sampled"
        );
        snapshot
    }

    pub fn cpu(&self) -> &CpuSampler {
        &self.cpu
    }

    pub fn memory(&self) -> &MemorySampler {
        &self.memory
    }

    pub fn gpu(&self) -> &GpuSampler {
        &self.gpu
    }

    pub fn battery(&self) -> &BatterySampler {
        &self.battery
    }
}
