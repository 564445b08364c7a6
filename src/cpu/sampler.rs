use tracing::debug;

use super::{CoreTicks, CpuTickSource};
use crate::core::types::Percentage;

/// Delta-based CPU utilization sampler.
///
/// Owns the previous counter sample exclusively. The only defined comparison is between two consecutive samples
/// with the same core count; anything else re-establishes the baseline and reports 0.
pub struct CpuSampler {
    source: Box<dyn CpuTickSource>,
    previous: Option<Vec<CoreTicks>>,
    per_core: Vec<Percentage>,
}

impl CpuSampler {
    pub fn new(source: Box<dyn CpuTickSource>) -> Self {
        Self { source, previous: None, per_core: Vec::new() }
    }

    /// Takes a sample and returns the average utilization across all cores.
    ///
    /// * First call (no baseline) reports exactly 0.
    /// * A failed counter query reports 0 and leaves the baseline untouched.
    /// * A change in core count discards the baseline and reports 0.
    pub fn sample(&mut self) -> Percentage {
        let current = match self.source.processor_ticks() {
            Ok(ticks) if !ticks.is_empty() => ticks,
            Ok(_) => {
                debug!(operation = "processor_ticks", "kernel reported no processors");
                return Percentage::ZERO;
            },
            Err(e) => {
                debug!(operation = "processor_ticks", error = %e, "CPU counter query failed");
                return Percentage::ZERO;
            },
        };

        let usage = match self.previous.take() {
            Some(previous) if previous.len() == current.len() => {
                self.per_core = previous.iter().zip(&current).map(|(prev, curr)| core_usage(prev, curr)).collect();
                average(&self.per_core)
            },
            Some(previous) => {
                debug!(previous = previous.len(), current = current.len(), "core count changed, discarding baseline");
                self.per_core.clear();
                Percentage::ZERO
            },
            None => {
                self.per_core.clear();
                Percentage::ZERO
            },
        };

        // The old buffer is dropped here; the new reading becomes the baseline.
        self.previous = Some(current);
        usage
    }

    /// Per-core utilization computed by the last successful delta, empty before the second sample.
    pub fn per_core(&self) -> &[Percentage] {
        &self.per_core
    }

    /// Whether a baseline sample is held.
    pub fn has_baseline(&self) -> bool {
        self.previous.is_some()
    }

    /// Drops the baseline so that the next sample is treated as the first one.
    pub fn reset(&mut self) {
        self.previous = None;
        self.per_core.clear();
    }
}

impl std::fmt::Debug for CpuSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSampler")
            .field("cores", &self.previous.as_ref().map(Vec::len))
            .field("per_core", &self.per_core)
            .finish()
    }
}

/// Utilization of one core between two consecutive samples.
///
/// A core that reports no elapsed ticks contributes exactly 0. 32-bit counters that wrapped are measured across the
/// wrap; a counter reset makes the interval indeterminate and also contributes 0.
pub fn core_usage(previous: &CoreTicks, current: &CoreTicks) -> Percentage {
    let Some(delta) = current.delta_since(previous) else {
        return Percentage::ZERO;
    };

    match delta.total() {
        0 => Percentage::ZERO,
        total => Percentage::ratio(delta.in_use() as f64, total as f64),
    }
}

fn average(values: &[Percentage]) -> Percentage {
    if values.is_empty() {
        return Percentage::ZERO;
    }
    let sum: f64 = values.iter().map(Percentage::as_f64).sum();
    Percentage::from_f64(sum / values.len() as f64)
}
