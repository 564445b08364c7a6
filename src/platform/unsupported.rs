//! Backends for targets without a metrics implementation. Every query fails or reports absence.

use crate::battery::{PowerSourceInfo, PowerSourceProvider};
use crate::cpu::{CoreTicks, CpuTickSource};
use crate::error::{Error, Result};
use crate::memory::{VmStatistics, VmStatsSource};

#[derive(Debug, Default)]
pub struct Unsupported;

impl CpuTickSource for Unsupported {
    fn processor_ticks(&self) -> Result<Vec<CoreTicks>> {
        Err(Error::not_available("processor tick counters"))
    }
}

impl VmStatsSource for Unsupported {
    fn vm_statistics(&self) -> Result<VmStatistics> {
        Err(Error::not_available("virtual memory statistics"))
    }

    fn physical_memory(&self) -> Result<u64> {
        Err(Error::not_available("physical memory size"))
    }
}

impl PowerSourceProvider for Unsupported {
    fn power_sources(&self) -> Result<Vec<PowerSourceInfo>> {
        Ok(Vec::new())
    }
}
