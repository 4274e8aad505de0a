//! Bounded polling loop used for readiness checks.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Run `probe` every `interval` until it returns true or `timeout` elapses.
///
/// Fixed interval, no backoff. Bounding the duration of a single probe
/// attempt is the probe's own job.
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if probe().await {
            return true;
        }
        if Instant::now() + interval > deadline {
            return false;
        }
        sleep(interval).await;
    }
}
