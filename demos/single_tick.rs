//! Takes two samples one interval apart without an async runtime and prints the second as JSON.

use std::error::Error;
use std::thread::sleep;

use host_sampler::prelude::*;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let config = MonitorConfig::default();
    let mut sampler = SystemSampler::new(&config);

    // The first CPU and GPU-timing readings only establish a baseline
    sampler.sample();
    sleep(config.interval());
    let snapshot = sampler.sample();

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    if let Ok(info) = sampler.memory().memory_info() {
        println!("Memory: {} of {} bytes used", info.used, info.total);
    }
    for (core, usage) in sampler.cpu().per_core().iter().enumerate() {
        println!("Core {}: {:.1}%", core, usage.as_f64());
    }
    for source in sampler.battery().power_sources() {
        println!("Power source {}: {:?}% (charging: {})", source.name, source.current_capacity, source.is_charging);
    }

    Ok(())
}
