//! The per-tick record handed to consumers.

use std::fmt;
use std::time::SystemTime;

use serde::Serialize;

use crate::core::types::Percentage;

/// One sampling tick's readings, every field within `[0, 100]`.
///
/// Immutable once built; consumers receive it by reference or copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    cpu: Percentage,
    memory: Percentage,
    gpu: Percentage,
    battery: Percentage,
    timestamp: SystemTime,
}

/// The metric carrying the highest load in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoadKind {
    Cpu,
    Gpu,
    Memory,
}

impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "CPU"),
            Self::Gpu => write!(f, "GPU"),
            Self::Memory => write!(f, "RAM"),
        }
    }
}

impl Snapshot {
    pub fn new(cpu: Percentage, memory: Percentage, gpu: Percentage, battery: Percentage, timestamp: SystemTime) -> Self {
        Self { cpu, memory, gpu, battery, timestamp }
    }

    pub fn cpu_percent(&self) -> f64 {
        self.cpu.as_f64()
    }

    pub fn memory_percent(&self) -> f64 {
        self.memory.as_f64()
    }

    pub fn gpu_percent(&self) -> f64 {
        self.gpu.as_f64()
    }

    pub fn battery_percent(&self) -> f64 {
        self.battery.as_f64()
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Which of CPU, GPU and memory is most loaded. Ties go to the earlier one in that order.
    pub fn dominant_load(&self) -> LoadKind {
        [(LoadKind::Gpu, self.gpu), (LoadKind::Memory, self.memory)]
            .into_iter()
            .fold((LoadKind::Cpu, self.cpu), |best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .0
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU {:5.1}%  RAM {:5.1}%  GPU {:5.1}%  BAT {:5.1}%",
            self.cpu_percent(),
            self.memory_percent(),
            self.gpu_percent(),
            self.battery_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cpu: f64, memory: f64, gpu: f64) -> Snapshot {
        Snapshot::new(
            Percentage::from_f64(cpu),
            Percentage::from_f64(memory),
            Percentage::from_f64(gpu),
            Percentage::FULL,
            SystemTime::UNIX_EPOCH,
        )
    }

    #[test]
    fn test_dominant_load() {
        assert_eq!(snapshot(80.0, 10.0, 20.0).dominant_load(), LoadKind::Cpu);
        assert_eq!(snapshot(10.0, 20.0, 80.0).dominant_load(), LoadKind::Gpu);
        assert_eq!(snapshot(10.0, 80.0, 20.0).dominant_load(), LoadKind::Memory);
    }

    #[test]
    fn test_dominant_load_ties_prefer_earlier() {
        assert_eq!(snapshot(50.0, 50.0, 50.0).dominant_load(), LoadKind::Cpu);
        assert_eq!(snapshot(10.0, 50.0, 50.0).dominant_load(), LoadKind::Gpu);
        assert_eq!(snapshot(0.0, 0.0, 0.0).dominant_load(), LoadKind::Cpu);
    }

    #[test]
    fn test_serializes_plain_numbers() {
        let json = serde_json::to_value(snapshot(12.5, 40.0, 0.0)).unwrap();
        assert_eq!(json["cpu"], 12.5);
        assert_eq!(json["memory"], 40.0);
        assert_eq!(json["battery"], 100.0);
    }
}
