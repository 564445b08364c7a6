use once_cell::sync::OnceCell;
use tracing::debug;

use super::{MemoryInfo, VmStatsSource};
use crate::core::types::Percentage;
use crate::error::Result;

/// Used-memory sampler.
///
/// Page statistics are read fresh on every tick. The only retained state is the physical memory size, which cannot
/// change while the process runs and is cached after the first successful query.
pub struct MemorySampler {
    source: Box<dyn VmStatsSource>,
    physical: OnceCell<u64>,
}

impl MemorySampler {
    pub fn new(source: Box<dyn VmStatsSource>) -> Self {
        Self { source, physical: OnceCell::new() }
    }

    /// Used memory as a percentage of physical memory, capped at 100.
    ///
    /// Any query failure, or a reported physical size of zero, yields 0.
    pub fn sample(&self) -> Percentage {
        match self.memory_info() {
            Ok(info) => Percentage::ratio(info.used as f64, info.total as f64),
            Err(e) => {
                debug!(operation = "vm_statistics", error = %e, "memory query failed");
                Percentage::ZERO
            },
        }
    }

    /// Byte breakdown for the current tick.
    pub fn memory_info(&self) -> Result<MemoryInfo> {
        let stats = self.source.vm_statistics()?;
        let total = self.physical_memory()?;

        Ok(MemoryInfo {
            total,
            used: stats.used_bytes(),
            free: stats.free.saturating_mul(stats.page_size),
            inactive: stats.inactive.saturating_mul(stats.page_size),
        })
    }

    /// Installed physical memory, queried on first use and cached afterwards.
    pub fn physical_memory(&self) -> Result<u64> {
        self.physical.get_or_try_init(|| self.source.physical_memory()).copied()
    }
}

impl std::fmt::Debug for MemorySampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySampler").field("physical", &self.physical.get()).finish()
    }
}
