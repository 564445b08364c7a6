//! Linux backends reading `/proc` and sysfs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::procfs;
use crate::battery::constants::{POWER_SUPPLY_DIR, POWER_SUPPLY_TYPE_BATTERY};
use crate::battery::{PowerSourceInfo, PowerSourceProvider};
use crate::cpu::{CoreTicks, CpuTickSource};
use crate::error::Result;
use crate::gpu::UtilizationCounter;
use crate::memory::{VmStatistics, VmStatsSource};

const PROC_STAT: &str = "/proc/stat";
const PROC_MEMINFO: &str = "/proc/meminfo";
const DRM_DIR: &str = "/sys/class/drm";

#[derive(Debug)]
pub struct ProcStat {
    path: PathBuf,
}

impl ProcStat {
    pub fn new() -> Self {
        Self::at(PROC_STAT)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CpuTickSource for ProcStat {
    fn processor_ticks(&self) -> Result<Vec<CoreTicks>> {
        procfs::parse_proc_stat(&fs::read_to_string(&self.path)?)
    }
}

#[derive(Debug)]
pub struct ProcMeminfo {
    path: PathBuf,
}

impl ProcMeminfo {
    pub fn new() -> Self {
        Self::at(PROC_MEMINFO)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl VmStatsSource for ProcMeminfo {
    fn vm_statistics(&self) -> Result<VmStatistics> {
        Ok(procfs::parse_meminfo(&fs::read_to_string(&self.path)?)?.0)
    }

    fn physical_memory(&self) -> Result<u64> {
        Ok(procfs::parse_meminfo(&fs::read_to_string(&self.path)?)?.1)
    }
}

/// `gpu_busy_percent` attribute of a DRM card (amdgpu, i915).
#[derive(Debug)]
pub struct DrmBusyPercent {
    path: PathBuf,
}

impl DrmBusyPercent {
    /// First `card*/device/gpu_busy_percent` under `/sys/class/drm`, if any.
    pub fn detect() -> Option<Self> {
        Self::detect_in(Path::new(DRM_DIR))
    }

    pub fn detect_in(drm_dir: &Path) -> Option<Self> {
        let mut cards: Vec<PathBuf> = fs::read_dir(drm_dir)
            .ok()?
            .flatten()
            .filter(|entry| {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                // connector entries look like card0-DP-1
                name.starts_with("card") && !name.contains('-')
            })
            .map(|entry| entry.path())
            .collect();
        cards.sort();

        cards
            .into_iter()
            .map(|card| card.join("device/gpu_busy_percent"))
            .find(|path| path.exists())
            .map(|path| Self { path })
    }
}

impl UtilizationCounter for DrmBusyPercent {
    fn utilization(&self) -> Result<Option<f64>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => procfs::parse_number(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Batteries under `/sys/class/power_supply`.
#[derive(Debug)]
pub struct SysfsPowerSupply {
    root: PathBuf,
}

impl SysfsPowerSupply {
    pub fn new() -> Self {
        Self::at(POWER_SUPPLY_DIR)
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read_attribute(dir: &Path, name: &str) -> Option<String> {
        fs::read_to_string(dir.join(name)).ok().map(|s| s.trim().to_string())
    }
}

impl PowerSourceProvider for SysfsPowerSupply {
    fn power_sources(&self) -> Result<Vec<PowerSourceInfo>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut supplies: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
        supplies.sort();

        Ok(supplies
            .iter()
            .filter(|dir| Self::read_attribute(dir, "type").as_deref() == Some(POWER_SUPPLY_TYPE_BATTERY))
            .map(|dir| PowerSourceInfo {
                name: dir.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
                current_capacity: Self::read_attribute(dir, "capacity").and_then(|c| procfs::parse_number(&c).ok()),
                max_capacity: None,
                is_charging: Self::read_attribute(dir, "status").as_deref() == Some("Charging"),
            })
            .collect())
    }
}
