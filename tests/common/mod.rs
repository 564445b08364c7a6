#![allow(dead_code)]

pub mod builders;
pub mod fakes;

pub use builders::TestSourcesBuilder;
pub use fakes::*;

use std::time::Duration;

/// Polls `condition` every few milliseconds until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
