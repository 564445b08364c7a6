use std::time::Instant;

use tracing::debug;

use super::CommandQueueTimer;
use crate::core::types::Percentage;

/// Timing-based utilization: GPU busy time of a no-op submission over wall-clock time since the last sample.
pub struct TimingStrategy {
    timer: Box<dyn CommandQueueTimer>,
    last_sample: Option<Instant>,
}

impl TimingStrategy {
    pub fn new(timer: Box<dyn CommandQueueTimer>) -> Self {
        Self { timer, last_sample: None }
    }

    pub fn sample(&mut self) -> Percentage {
        self.sample_at(Instant::now())
    }

    /// Samples with an explicit wall-clock reading.
    ///
    /// The first call only records `now` and reports 0. A failed submission reports 0 and keeps the previous
    /// reference.
    pub fn sample_at(&mut self, now: Instant) -> Percentage {
        let Some(last) = self.last_sample else {
            self.last_sample = Some(now);
            return Percentage::ZERO;
        };

        let busy = match self.timer.time_noop_submission() {
            Ok(busy) => busy,
            Err(e) => {
                debug!(operation = "time_noop_submission", error = %e, "GPU timing query failed");
                return Percentage::ZERO;
            },
        };

        self.last_sample = Some(now);
        let elapsed = now.saturating_duration_since(last);
        if elapsed.is_zero() {
            return Percentage::ZERO;
        }
        Percentage::ratio(busy.as_secs_f64(), elapsed.as_secs_f64())
    }
}
