use serde::Serialize;

/// Page counts of one virtual-memory statistics query
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize)]
pub struct VmStatistics {
    /// Memory pages immediately available for allocation
    pub free: u64,
    /// Memory pages actively in use
    pub active: u64,
    /// Memory pages that haven't been accessed recently but still in RAM
    pub inactive: u64,
    /// Memory pages that cannot be paged out
    pub wired: u64,
    /// Memory pages occupied by the compressor
    pub compressed: u64,
    /// Size of one page in bytes
    pub page_size: u64,
}

impl VmStatistics {
    /// Bytes held by active, wired and compressed pages.
    pub fn used_bytes(&self) -> u64 {
        self.active
            .saturating_add(self.wired)
            .saturating_add(self.compressed)
            .saturating_mul(self.page_size)
    }
}

/// Memory metrics information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    /// Total physical memory in bytes
    pub total: u64,
    /// Active, wired and compressed memory in bytes
    pub used: u64,
    /// Free memory in bytes
    pub free: u64,
    /// Inactive (reclaimable) memory in bytes
    pub inactive: u64,
}
