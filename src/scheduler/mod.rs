//! # Sampling Scheduler
//!
//! Drives a [`SystemSampler`] at a fixed interval and publishes each [`Snapshot`](crate::snapshot::Snapshot)
//! through a [`SnapshotPublisher`].
//!
//! At most one tick is in flight at any time. Each tick runs the samplers on tokio's blocking pool, since every OS
//! query may block on a syscall or driver call. A tick that comes due while the previous one is still running is
//! skipped, not queued, and counted in [`TickStats::skipped`].
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use host_sampler::config::MonitorConfig;
//! use host_sampler::scheduler::{Scheduler, SnapshotPublisher, SystemSampler};
//!
//! #[tokio::main]
//! async fn main() -> host_sampler::Result<()> {
//!     let config = MonitorConfig::default();
//!     let publisher = Arc::new(SnapshotPublisher::new());
//!     publisher.subscribe(|snapshot| println!("{snapshot}"));
//!
//!     let scheduler = Scheduler::start(SystemSampler::new(&config), publisher, config.interval())?;
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     let stats = scheduler.stop().await;
//!     println!("{} ticks, {} skipped", stats.completed, stats.skipped);
//!     Ok(())
//! }
//! ```

mod publisher;
mod system;

pub use publisher::*;
pub use system::*;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Tick counters of a scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    /// Ticks that sampled and published a snapshot
    pub completed: u64,
    /// Ticks dropped because the previous tick was still running
    pub skipped: u64,
}

/// State shared between the scheduler handle, the driver task and in-flight ticks.
struct Shared {
    sampler: Mutex<Option<SystemSampler>>,
    publisher: Arc<SnapshotPublisher>,
    completed: AtomicU64,
    skipped: AtomicU64,
}

impl Shared {
    fn stats(&self) -> TickStats {
        TickStats { completed: self.completed.load(Ordering::Acquire), skipped: self.skipped.load(Ordering::Acquire) }
    }

    /// One sampling tick. Runs on the blocking pool.
    fn tick(&self) {
        let snapshot = {
            let mut sampler = self.sampler.lock();
            match sampler.as_mut() {
                Some(sampler) => sampler.sample(),
                None => return,
            }
        };
        self.publisher.publish(snapshot);
        self.completed.fetch_add(1, Ordering::AcqRel);
    }
}

/// Handle to a running sampling loop.
///
/// Needs a tokio runtime; [`Scheduler::start`] reports [`Error::NotAvailable`] without one. Dropping a running scheduler aborts the driver; sampler resources are
/// then released once any in-flight tick has finished.
pub struct Scheduler {
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
    driver: Option<JoinHandle<()>>,
    interval: Duration,
}

impl Scheduler {
    /// Starts ticking every `interval`; the first tick fires immediately.
    pub fn start(sampler: SystemSampler, publisher: Arc<SnapshotPublisher>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::invalid_config("scheduler interval must be non-zero"));
        }
        let runtime = Handle::try_current().map_err(|e| Error::not_available(format!("tokio runtime: {e}")))?;

        let shared = Arc::new(Shared {
            sampler: Mutex::new(Some(sampler)),
            publisher,
            completed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        });
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let driver = runtime.spawn(drive(Arc::clone(&shared), interval, shutdown_rx));

        info!(interval_ms = interval.as_millis() as u64, "sampling scheduler started");
        Ok(Self { shared, shutdown: Some(shutdown_tx), driver: Some(driver), interval })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> TickStats {
        self.shared.stats()
    }

    pub fn publisher(&self) -> &Arc<SnapshotPublisher> {
        &self.shared.publisher
    }

    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(|driver| !driver.is_finished())
    }

    /// Stops ticking, waits for the in-flight tick and releases the samplers' OS resources.
    pub async fn stop(mut self) -> TickStats {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(driver) = self.driver.take() {
            if let Err(e) = driver.await {
                warn!(error = %e, "sampling driver task failed");
            }
        }

        // No tick can be running any more; this is the only place the samplers are dropped.
        let released = self.shared.sampler.lock().take();
        drop(released);

        let stats = self.shared.stats();
        info!(completed = stats.completed, skipped = stats.skipped, "sampling scheduler stopped");
        stats
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .field("stats", &self.stats())
            .finish()
    }
}

async fn drive(shared: Arc<Shared>, period: Duration, mut shutdown: oneshot::Receiver<()>) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {},
        }

        if in_flight.as_ref().is_some_and(|tick| !tick.is_finished()) {
            let skipped = shared.skipped.fetch_add(1, Ordering::AcqRel) + 1;
            debug!(skipped, "previous tick still running, skipping");
            continue;
        }

        let tick_shared = Arc::clone(&shared);
        in_flight = Some(tokio::task::spawn_blocking(move || tick_shared.tick()));
    }

    if let Some(tick) = in_flight {
        if let Err(e) = tick.await {
            warn!(error = %e, "sampling tick failed");
        }
    }
    debug!("sampling driver exiting");
}
