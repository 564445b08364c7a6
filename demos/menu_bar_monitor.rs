//! Terminal stand-in for a menu-bar display: keeps a rolling 60-sample history per metric and prints a sparkline
//! for each tick.
//!
//! ```text
//! cargo run --example menu_bar_monitor [config.json]
//! RUST_LOG=host_sampler=debug cargo run --example menu_bar_monitor
//! ```

use std::collections::VecDeque;
use std::error::Error;
use std::sync::Arc;

use host_sampler::prelude::*;
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// Samples kept per metric, one per second at the default interval
const HISTORY_LEN: usize = 60;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

struct History {
    cpu: VecDeque<f64>,
    memory: VecDeque<f64>,
    gpu: VecDeque<f64>,
}

impl History {
    fn new() -> Self {
        let zeros = || VecDeque::from(vec![0.0; HISTORY_LEN]);
        Self { cpu: zeros(), memory: zeros(), gpu: zeros() }
    }

    fn push(&mut self, snapshot: &Snapshot) {
        for (series, value) in [
            (&mut self.cpu, snapshot.cpu_percent()),
            (&mut self.memory, snapshot.memory_percent()),
            (&mut self.gpu, snapshot.gpu_percent()),
        ] {
            series.pop_front();
            series.push_back(value);
        }
    }

    fn sparkline(series: &VecDeque<f64>) -> String {
        series
            .iter()
            .map(|value| BARS[(((value / 100.0) * (BARS.len() - 1) as f64).round() as usize).min(BARS.len() - 1)])
            .collect()
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => MonitorConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => MonitorConfig::default(),
    };

    let sampler = SystemSampler::new(&config);
    println!("Host Sampler - Menu Bar Monitor");
    println!("GPU strategy: {}", sampler.gpu().strategy());
    println!("Press Ctrl+C to exit\n");

    let history = Arc::new(Mutex::new(History::new()));
    let publisher = Arc::new(SnapshotPublisher::new());
    let sink = Arc::clone(&history);
    publisher.subscribe(move |snapshot| {
        let mut history = sink.lock();
        history.push(snapshot);
        println!("{snapshot}  [{}]", snapshot.dominant_load());
        println!("  CPU {}", History::sparkline(&history.cpu));
        println!("  GPU {}", History::sparkline(&history.gpu));
        println!("  RAM {}", History::sparkline(&history.memory));
    });

    let scheduler = Scheduler::start(sampler, publisher, config.interval())?;

    tokio::signal::ctrl_c().await?;
    let stats = scheduler.stop().await;
    println!("\n{} ticks published, {} skipped", stats.completed, stats.skipped);

    Ok(())
}
