//! Bounded polling used by every wait of the facade

use crate::errors::ActionError;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Poll `probe` until it yields `Some`, or fail with [`ActionError::WaitTimeout`].
///
/// The probe runs at least once even with a zero timeout. Probe errors are
/// returned immediately; only "not yet" (`None`) is retried.
pub async fn poll_until<T, F, Fut>(
    timeout: Duration,
    interval: Duration,
    what: &str,
    mut probe: F,
) -> Result<T, ActionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, ActionError>>,
{
    let deadline = Instant::now() + timeout;
    let mut probes = 0u32;

    loop {
        probes += 1;
        if let Some(value) = probe().await? {
            debug!(what, probes, "wait condition met");
            return Ok(value);
        }

        if Instant::now() >= deadline {
            return Err(ActionError::WaitTimeout(format!(
                "{} not met after {}ms",
                what,
                timeout.as_millis()
            )));
        }

        sleep(interval).await;
    }
}
