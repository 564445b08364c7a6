use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::warn;

use crate::snapshot::Snapshot;

/// Callback invoked with every published snapshot
pub type SnapshotCallback = Box<dyn Fn(&Snapshot) + Send + Sync>;

/// Handle returned by [`SnapshotPublisher::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Delivers each tick's [`Snapshot`] to registered callbacks and to `watch` receivers.
///
/// Callbacks run on the thread that publishes, one after another in subscription order. They must not subscribe or
/// unsubscribe from inside the callback.
pub struct SnapshotPublisher {
    callbacks: RwLock<Vec<(SubscriptionId, SnapshotCallback)>>,
    next_id: AtomicU64,
    latest: watch::Sender<Option<Snapshot>>,
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let (latest, _) = watch::channel(None);
        Self { callbacks: RwLock::new(Vec::new()), next_id: AtomicU64::new(0), latest }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.write().push((id, Box::new(callback)));
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.write();
        let before = callbacks.len();
        callbacks.retain(|(registered, _)| *registered != id);
        callbacks.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.callbacks.read().len()
    }

    /// A receiver that observes the most recent snapshot; `None` until the first tick.
    pub fn watch(&self) -> watch::Receiver<Option<Snapshot>> {
        self.latest.subscribe()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        *self.latest.borrow()
    }

    /// Publishes one snapshot. A panicking callback is logged and does not affect the others.
    pub fn publish(&self, snapshot: Snapshot) {
        self.latest.send_replace(Some(snapshot));

        for (id, callback) in self.callbacks.read().iter() {
            if panic::catch_unwind(AssertUnwindSafe(|| callback(&snapshot))).is_err() {
                warn!(subscription = id.0, "snapshot subscriber panicked");
            }
        }
    }
}

impl std::fmt::Debug for SnapshotPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotPublisher")
            .field("subscribers", &self.subscriber_count())
            .field("latest", &self.latest())
            .finish()
    }
}
