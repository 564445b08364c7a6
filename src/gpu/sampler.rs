use tracing::{debug, info, warn};

use super::{CommandQueueTimer, GpuStrategy, GpuStrategyPreference, TimingStrategy, UtilizationCounter};
use crate::core::types::Percentage;

/// GPU utilization sampler with the strategy fixed at construction.
pub enum GpuSampler {
    Counter(Box<dyn UtilizationCounter>),
    Timing(TimingStrategy),
    /// No usable device; every sample is 0
    Unavailable,
}

impl GpuSampler {
    /// Selects a strategy by probing the acquired device handles.
    ///
    /// The counter is read once; a missing counter (`Ok(None)`) or a failed read rules the strategy out. Handles
    /// not used by the selected strategy are dropped here.
    pub fn probe(
        preference: GpuStrategyPreference,
        counter: Option<Box<dyn UtilizationCounter>>,
        timer: Option<Box<dyn CommandQueueTimer>>,
    ) -> Self {
        let sampler = match preference {
            GpuStrategyPreference::Disabled => {
                info!("GPU sampling disabled");
                return Self::Unavailable;
            },
            GpuStrategyPreference::Counter => Self::try_counter(counter),
            GpuStrategyPreference::Timing => timer.map(Self::timing),
            GpuStrategyPreference::Auto => Self::try_counter(counter).or_else(|| timer.map(Self::timing)),
        };

        match sampler {
            Some(sampler) => {
                debug!(strategy = %sampler.strategy(), "GPU strategy selected");
                sampler
            },
            None => {
                warn!(preference = ?preference, "no GPU utilization source found, reporting 0");
                Self::Unavailable
            },
        }
    }

    fn timing(timer: Box<dyn CommandQueueTimer>) -> Self {
        Self::Timing(TimingStrategy::new(timer))
    }

    fn try_counter(counter: Option<Box<dyn UtilizationCounter>>) -> Option<Self> {
        let counter = counter?;
        match counter.utilization() {
            Ok(Some(_)) => Some(Self::Counter(counter)),
            Ok(None) => {
                debug!(operation = "utilization", "device does not publish a utilization counter");
                None
            },
            Err(e) => {
                debug!(operation = "utilization", error = %e, "utilization counter probe failed");
                None
            },
        }
    }

    pub fn sample(&mut self) -> Percentage {
        match self {
            Self::Counter(counter) => match counter.utilization() {
                Ok(Some(value)) => Percentage::from_f64(value),
                Ok(None) => {
                    debug!(operation = "utilization", "utilization counter missing this tick");
                    Percentage::ZERO
                },
                Err(e) => {
                    debug!(operation = "utilization", error = %e, "GPU counter query failed");
                    Percentage::ZERO
                },
            },
            Self::Timing(timing) => timing.sample(),
            Self::Unavailable => Percentage::ZERO,
        }
    }

    pub fn strategy(&self) -> GpuStrategy {
        match self {
            Self::Counter(_) => GpuStrategy::Counter,
            Self::Timing(_) => GpuStrategy::Timing,
            Self::Unavailable => GpuStrategy::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

impl std::fmt::Debug for GpuSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GpuSampler").field(&self.strategy()).finish()
    }
}
