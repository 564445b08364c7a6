use super::*;
use crate::error::Error;

fn source(name: &str, current: Option<i64>, max: Option<i64>) -> PowerSourceInfo {
    PowerSourceInfo { name: name.to_string(), current_capacity: current, max_capacity: max, is_charging: false }
}

fn sampler(sources: Vec<PowerSourceInfo>) -> BatterySampler {
    let mut provider = MockPowerSourceProvider::new();
    provider.expect_power_sources().returning(move || Ok(sources.clone()));
    BatterySampler::new(Box::new(provider))
}

#[test]
fn test_no_battery_reports_full() {
    assert_eq!(sampler(Vec::new()).sample(), Percentage::FULL);
}

#[test]
fn test_enumeration_failure_reports_full() {
    let mut provider = MockPowerSourceProvider::new();
    provider.expect_power_sources().returning(|| Err(Error::system("IOPSCopyPowerSourcesInfo")));
    let battery = BatterySampler::new(Box::new(provider));

    assert_eq!(battery.sample(), Percentage::FULL);
    assert!(battery.power_sources().is_empty());
}

#[test]
fn test_first_source_with_capacity_wins() {
    let battery = sampler(vec![
        source("UPS", None, None),
        source("InternalBattery-0", Some(42), Some(100)),
        source("Other", Some(90), Some(100)),
    ]);
    assert_eq!(battery.sample().as_f64(), 42.0);
}

#[test]
fn test_capacity_is_scaled_by_max() {
    let battery = sampler(vec![source("InternalBattery-0", Some(2500), Some(5000))]);
    assert_eq!(battery.sample().as_f64(), 50.0);
}

#[test]
fn test_percent_scale_reports_raw_current() {
    for current in [0, 1, 37, 99, 100] {
        let percent = source("InternalBattery-0", Some(current), Some(100)).charge_percentage().unwrap();
        assert!((percent - current as f64).abs() < 1e-9, "{current} read as {percent}");
    }
}

#[test]
fn test_missing_max_uses_current_directly() {
    assert_eq!(source("b", Some(64), None).charge_percentage(), Some(64.0));
    assert_eq!(source("b", Some(64), Some(0)).charge_percentage(), Some(64.0));
    assert_eq!(source("b", None, Some(100)).charge_percentage(), None);
}

#[test]
fn test_charge_is_clamped() {
    assert_eq!(sampler(vec![source("b", Some(130), None)]).sample(), Percentage::FULL);
    assert_eq!(sampler(vec![source("b", Some(-5), Some(100))]).sample(), Percentage::ZERO);
}
