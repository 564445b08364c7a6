use serde::Serialize;

/// Tick counters of a single logical core.
///
/// Values are opaque, monotonically increasing counts reported by the kernel. They are widened to `u64` regardless
/// of the platform's native counter width; Mach reports 32-bit counters that wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CoreTicks {
    /// Ticks spent in user mode
    pub user: u64,
    /// Ticks spent in kernel mode
    pub system: u64,
    /// Ticks spent running niced processes
    pub nice: u64,
    /// Ticks spent idle
    pub idle: u64,
}

impl CoreTicks {
    pub fn new(user: u64, system: u64, nice: u64, idle: u64) -> Self {
        Self { user, system, nice, idle }
    }

    /// Ticks spent doing work: `user + system + nice`
    pub fn in_use(&self) -> u64 {
        self.user.saturating_add(self.system).saturating_add(self.nice)
    }

    /// All accounted ticks: `in_use + idle`
    pub fn total(&self) -> u64 {
        self.in_use().saturating_add(self.idle)
    }

    /// Ticks elapsed per state since `previous`, or `None` if any counter was reset.
    ///
    /// A counter that went backwards while both readings fit in 32 bits is taken to have wrapped, provided the
    /// wrapped distance is at most [`MAX_WRAP_DELTA`].
    pub fn delta_since(&self, previous: &CoreTicks) -> Option<CoreTicks> {
        Some(CoreTicks {
            user: counter_delta(previous.user, self.user)?,
            system: counter_delta(previous.system, self.system)?,
            nice: counter_delta(previous.nice, self.nice)?,
            idle: counter_delta(previous.idle, self.idle)?,
        })
    }
}

/// Largest forward distance accepted across a 32-bit wrap. A longer one is a reset.
pub const MAX_WRAP_DELTA: u64 = u32::MAX as u64 / 2;

fn counter_delta(previous: u64, current: u64) -> Option<u64> {
    if let Some(delta) = current.checked_sub(previous) {
        return Some(delta);
    }
    let previous = u32::try_from(previous).ok()?;
    let current = u32::try_from(current).ok()?;
    let delta = u64::from(current.wrapping_sub(previous));
    (delta <= MAX_WRAP_DELTA).then_some(delta)
}
