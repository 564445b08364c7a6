use super::*;
use crate::core::types::Percentage;
use crate::error::Error;

fn stats(active: u64, wired: u64, compressed: u64) -> VmStatistics {
    VmStatistics { free: 100, active, inactive: 300, wired, compressed, page_size: 4096 }
}

fn sampler(vm: VmStatistics, physical: u64) -> MemorySampler {
    let mut source = MockVmStatsSource::new();
    source.expect_vm_statistics().returning(move || Ok(vm));
    source.expect_physical_memory().returning(move || Ok(physical));
    MemorySampler::new(Box::new(source))
}

#[test]
fn test_used_pages_formula() {
    let memory = sampler(stats(1000, 500, 200), 8_000_000_000);
    let info = memory.memory_info().unwrap();
    assert_eq!(info.used, 6_963_200);
    assert_eq!(info.free, 409_600);
    assert_eq!(info.inactive, 1_228_800);

    let percent = memory.sample().as_f64();
    assert!((percent - 0.08704).abs() < 1e-9);
}

#[test]
fn test_percentage_is_capped() {
    let memory = sampler(stats(1_000_000, 0, 0), 4096);
    assert_eq!(memory.sample(), Percentage::FULL);
}

#[test]
fn test_zero_physical_memory_reports_zero() {
    let memory = sampler(stats(1000, 500, 200), 0);
    assert_eq!(memory.sample(), Percentage::ZERO);
}

#[test]
fn test_monotone_in_used_pages() {
    let total = 16 * 1024 * 1024 * 1024;
    let mut last = 0.0;
    for active in (0..4_000_000).step_by(250_000) {
        let percent = sampler(stats(active, 1000, 1000), total).sample().as_f64();
        assert!(percent >= last);
        assert!(percent <= 100.0);
        last = percent;
    }
}

#[test]
fn test_query_failure_reports_zero() {
    let mut source = MockVmStatsSource::new();
    source.expect_vm_statistics().returning(|| Err(Error::system("host_statistics64")));
    source.expect_physical_memory().returning(|| Ok(8_000_000_000));
    let memory = MemorySampler::new(Box::new(source));

    assert_eq!(memory.sample(), Percentage::ZERO);
    assert!(memory.memory_info().is_err());
}

#[test]
fn test_physical_memory_is_cached() {
    let mut source = MockVmStatsSource::new();
    source.expect_vm_statistics().returning(|| Ok(stats(1, 1, 1)));
    source.expect_physical_memory().times(1).returning(|| Ok(1 << 30));
    let memory = MemorySampler::new(Box::new(source));

    for _ in 0..5 {
        memory.sample();
    }
    assert_eq!(memory.physical_memory().unwrap(), 1 << 30);
}

#[test]
fn test_physical_memory_failure_is_retried() {
    let mut source = MockVmStatsSource::new();
    let mut seq = mockall::Sequence::new();
    source.expect_vm_statistics().returning(|| Ok(stats(1000, 500, 200)));
    source
        .expect_physical_memory()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Err(Error::system("sysctlbyname(hw.memsize)")));
    source.expect_physical_memory().times(1).in_sequence(&mut seq).returning(|| Ok(8_000_000_000));
    let memory = MemorySampler::new(Box::new(source));

    assert_eq!(memory.sample(), Percentage::ZERO);
    assert!(memory.sample().as_f64() > 0.0);
}
