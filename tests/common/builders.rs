use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use host_sampler::prelude::*;

use super::fakes::*;

/// Builds a [`Sources`] from fake backends. Defaults: one idle core, 25% memory, no GPU, no battery.
pub struct TestSourcesBuilder {
    cpu: Box<dyn CpuTickSource>,
    memory: Box<dyn VmStatsSource>,
    gpu_counter: Option<Box<dyn UtilizationCounter>>,
    gpu_timer: Option<Box<dyn CommandQueueTimer>>,
    power: Vec<PowerSourceInfo>,
}

impl Default for TestSourcesBuilder {
    fn default() -> Self {
        Self {
            cpu: Box::new(ScriptedTicks::new(vec![vec![CoreTicks::new(0, 0, 0, 100)]])),
            memory: Box::new(FixedVm {
                stats: VmStatistics { active: 250, page_size: 4096, ..Default::default() },
                physical: 1000 * 4096,
            }),
            gpu_counter: None,
            gpu_timer: None,
            power: Vec::new(),
        }
    }
}

impl TestSourcesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cpu(mut self, cpu: impl CpuTickSource + 'static) -> Self {
        self.cpu = Box::new(cpu);
        self
    }

    pub fn memory(mut self, memory: impl VmStatsSource + 'static) -> Self {
        self.memory = Box::new(memory);
        self
    }

    pub fn gpu_counter(mut self, value: Option<f64>, released: Option<&Arc<AtomicUsize>>) -> Self {
        self.gpu_counter = Some(Box::new(FixedCounter { value, _tracker: released.map(ReleaseTracker::new) }));
        self
    }

    pub fn gpu_timer(mut self, busy: Duration, released: Option<&Arc<AtomicUsize>>) -> Self {
        self.gpu_timer = Some(Box::new(FixedTimer { busy, _tracker: released.map(ReleaseTracker::new) }));
        self
    }

    pub fn battery(mut self, name: &str, current: i64, max: i64) -> Self {
        self.power.push(PowerSourceInfo {
            name: name.to_string(),
            current_capacity: Some(current),
            max_capacity: Some(max),
            is_charging: false,
        });
        self
    }

    pub fn build(self) -> Sources {
        Sources {
            cpu: self.cpu,
            memory: self.memory,
            gpu_counter: self.gpu_counter,
            gpu_timer: self.gpu_timer,
            power: Box::new(FixedPower(self.power)),
        }
    }
}
