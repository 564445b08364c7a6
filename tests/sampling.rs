mod common;

use std::time::Duration;

use common::*;
use host_sampler::prelude::*;

#[test]
fn test_first_tick_reports_zero_cpu() {
    let sources = TestSourcesBuilder::new()
        .cpu(ScriptedTicks::new(vec![
            vec![CoreTicks::new(100, 50, 0, 850)],
            vec![CoreTicks::new(150, 70, 0, 880)],
        ]))
        .build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Auto);

    assert_eq!(sampler.sample().cpu_percent(), 0.0);
    assert!((sampler.sample().cpu_percent() - 70.0).abs() < 1e-9);
}

#[test]
fn test_memory_scenario() {
    let sources = TestSourcesBuilder::new()
        .memory(FixedVm {
            stats: VmStatistics { active: 1000, wired: 500, compressed: 200, page_size: 4096, ..Default::default() },
            physical: 8_000_000_000,
        })
        .build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Auto);

    let percent = sampler.sample().memory_percent();
    assert!((percent - 0.08704).abs() < 1e-9);
}

#[test]
fn test_absent_devices_degrade_gracefully() {
    let sources = TestSourcesBuilder::new().memory(FailingVm).build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Auto);
    assert_eq!(sampler.gpu().strategy(), GpuStrategy::Unavailable);

    for _ in 0..5 {
        let snapshot = sampler.sample();
        assert_eq!(snapshot.gpu_percent(), 0.0);
        assert_eq!(snapshot.memory_percent(), 0.0);
        assert_eq!(snapshot.battery_percent(), 100.0);
    }
}

#[test]
fn test_battery_capacity() {
    let sources = TestSourcesBuilder::new().battery("InternalBattery-0", 3000, 4000).build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Auto);
    assert_eq!(sampler.sample().battery_percent(), 75.0);
}

#[test]
fn test_gpu_counter_preferred_over_timing() {
    let sources = TestSourcesBuilder::new()
        .gpu_counter(Some(64.0), None)
        .gpu_timer(Duration::from_millis(1), None)
        .build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Auto);

    assert_eq!(sampler.gpu().strategy(), GpuStrategy::Counter);
    assert_eq!(sampler.sample().gpu_percent(), 64.0);
}

#[test]
fn test_gpu_timing_fallback_starts_at_zero() {
    let sources = TestSourcesBuilder::new()
        .gpu_counter(None, None)
        .gpu_timer(Duration::from_millis(1), None)
        .build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Auto);

    assert_eq!(sampler.gpu().strategy(), GpuStrategy::Timing);
    assert_eq!(sampler.sample().gpu_percent(), 0.0);
    std::thread::sleep(Duration::from_millis(20));
    let second = sampler.sample().gpu_percent();
    assert!(second > 0.0 && second <= 100.0);
}

#[test]
fn test_snapshot_fields_within_bounds() {
    let sources = TestSourcesBuilder::new()
        .cpu(ScriptedTicks::new(vec![
            vec![CoreTicks::new(0, 0, 0, 0), CoreTicks::new(u64::MAX, 0, 0, 0)],
            vec![CoreTicks::new(500, 0, 0, 0), CoreTicks::new(0, 0, 0, 0)],
        ]))
        .gpu_counter(Some(250.0), None)
        .battery("UPS", 180, 0)
        .build();
    let mut sampler = SystemSampler::with_sources(sources, GpuStrategyPreference::Counter);

    for _ in 0..3 {
        let s = sampler.sample();
        for value in [s.cpu_percent(), s.memory_percent(), s.gpu_percent(), s.battery_percent()] {
            assert!((0.0..=100.0).contains(&value), "{value} out of range");
        }
    }
}

#[test]
fn test_live_platform_sampling_in_range() {
    let mut sampler = SystemSampler::new(&MonitorConfig::default());
    sampler.sample();
    std::thread::sleep(Duration::from_millis(100));
    let s = sampler.sample();
    for value in [s.cpu_percent(), s.memory_percent(), s.gpu_percent(), s.battery_percent()] {
        assert!((0.0..=100.0).contains(&value));
    }
}
