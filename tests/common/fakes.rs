use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use host_sampler::prelude::*;
use parking_lot::{Condvar, Mutex};

/// Increments a shared counter when dropped, to observe resource release.
#[derive(Debug)]
pub struct ReleaseTracker(Arc<AtomicUsize>);

impl ReleaseTracker {
    pub fn new(released: &Arc<AtomicUsize>) -> Self {
        Self(Arc::clone(released))
    }
}

impl Drop for ReleaseTracker {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Replays tick readings in order, repeating the last one.
pub struct ScriptedTicks {
    readings: Mutex<VecDeque<Vec<CoreTicks>>>,
    _tracker: Option<ReleaseTracker>,
}

impl ScriptedTicks {
    pub fn new(readings: Vec<Vec<CoreTicks>>) -> Self {
        Self { readings: Mutex::new(readings.into()), _tracker: None }
    }

    pub fn tracked(mut self, released: &Arc<AtomicUsize>) -> Self {
        self._tracker = Some(ReleaseTracker::new(released));
        self
    }
}

impl CpuTickSource for ScriptedTicks {
    fn processor_ticks(&self) -> Result<Vec<CoreTicks>> {
        let mut readings = self.readings.lock();
        match readings.len() {
            0 => Err(Error::NotAvailable("no scripted readings".into())),
            1 => Ok(readings[0].clone()),
            _ => Ok(readings.pop_front().unwrap_or_default()),
        }
    }
}

/// Blocks the first query until [`Gate::open`] is called and records overlapping calls.
pub struct GatedTicks {
    gate: Arc<Gate>,
    calls: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
    max_active: Arc<AtomicUsize>,
}

#[derive(Default)]
pub struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    pub fn open(&self) {
        *self.open.lock() = true;
        self.cond.notify_all();
    }

    fn wait(&self) {
        let mut open = self.open.lock();
        while !*open {
            self.cond.wait(&mut open);
        }
    }
}

/// Observers for a [`GatedTicks`] source.
#[derive(Clone, Default)]
pub struct GateProbe {
    pub gate: Arc<Gate>,
    pub calls: Arc<AtomicUsize>,
    pub max_active: Arc<AtomicUsize>,
}

impl GatedTicks {
    pub fn new() -> (Self, GateProbe) {
        let probe = GateProbe::default();
        let source = Self {
            gate: Arc::clone(&probe.gate),
            calls: Arc::clone(&probe.calls),
            active: Arc::new(AtomicUsize::new(0)),
            max_active: Arc::clone(&probe.max_active),
        };
        (source, probe)
    }
}

impl CpuTickSource for GatedTicks {
    fn processor_ticks(&self) -> Result<Vec<CoreTicks>> {
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            self.gate.wait();
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        let n = call as u64;
        Ok(vec![CoreTicks::new(10 * n, 0, 0, 10 * n)])
    }
}

pub struct FixedVm {
    pub stats: VmStatistics,
    pub physical: u64,
}

impl VmStatsSource for FixedVm {
    fn vm_statistics(&self) -> Result<VmStatistics> {
        Ok(self.stats)
    }

    fn physical_memory(&self) -> Result<u64> {
        Ok(self.physical)
    }
}

pub struct FailingVm;

impl VmStatsSource for FailingVm {
    fn vm_statistics(&self) -> Result<VmStatistics> {
        Err(Error::System("host_statistics64 failed with status 0x5".into()))
    }

    fn physical_memory(&self) -> Result<u64> {
        Err(Error::System("sysctlbyname failed".into()))
    }
}

pub struct FixedCounter {
    pub value: Option<f64>,
    pub _tracker: Option<ReleaseTracker>,
}

impl UtilizationCounter for FixedCounter {
    fn utilization(&self) -> Result<Option<f64>> {
        Ok(self.value)
    }
}

pub struct FixedTimer {
    pub busy: Duration,
    pub _tracker: Option<ReleaseTracker>,
}

impl CommandQueueTimer for FixedTimer {
    fn time_noop_submission(&self) -> Result<Duration> {
        Ok(self.busy)
    }
}

pub struct FixedPower(pub Vec<PowerSourceInfo>);

impl PowerSourceProvider for FixedPower {
    fn power_sources(&self) -> Result<Vec<PowerSourceInfo>> {
        Ok(self.0.clone())
    }
}
