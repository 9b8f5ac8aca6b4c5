//! Bounded retry driver

use crate::types::{Probe, RetryOutcome, RetryPolicy};
use std::future::Future;
use tokio::time::sleep;
use tracing::{debug, info, warn};

impl RetryPolicy {
    /// Run `probe` until it reports [`Probe::Ready`] or attempts run out.
    ///
    /// `probe` receives the 1-based attempt number. The backoff pause is taken
    /// between attempts, never after the last one. A probe error ends the loop
    /// at once and is returned as is.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut probe: F) -> Result<RetryOutcome<T>, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Probe<T>, E>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match probe(attempt).await? {
                Probe::Ready(value) => {
                    debug!(label, attempt, "retry loop satisfied");
                    return Ok(RetryOutcome::Satisfied {
                        value,
                        attempts: attempt,
                    });
                }
                Probe::Pending(last) if attempt >= max_attempts => {
                    warn!(
                        label,
                        attempts = attempt,
                        policy = ?self.on_exhaustion,
                        "retry attempts exhausted"
                    );
                    return Ok(RetryOutcome::Exhausted {
                        last,
                        attempts: attempt,
                        policy: self.on_exhaustion,
                    });
                }
                Probe::Pending(_) => {
                    info!(
                        label,
                        attempt,
                        backoff_ms = self.backoff_ms,
                        "condition not met, retrying"
                    );
                    sleep(self.backoff()).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exhaustion;
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn stops_on_first_ready_attempt() {
        let policy = RetryPolicy::row_match();
        let counts = [0usize, 2, 1];
        let start = Instant::now();

        let outcome = policy
            .run("rows", |attempt| async move {
                let found = counts[(attempt - 1) as usize];
                Ok::<_, ()>(if found == 1 {
                    Probe::Ready(found)
                } else {
                    Probe::Pending(found)
                })
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RetryOutcome::Satisfied {
                value: 1,
                attempts: 3
            }
        );
        // two pauses, one before each retry
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn reports_exhaustion_with_last_value() {
        let policy = RetryPolicy::escape_close();
        let mut calls = 0;

        let outcome = policy
            .run("esc", |attempt| {
                calls += 1;
                async move { Ok::<_, ()>(Probe::Pending(attempt)) }
            })
            .await
            .unwrap();

        assert_eq!(calls, 5);
        assert_eq!(
            outcome,
            RetryOutcome::Exhausted {
                last: 5,
                attempts: 5,
                policy: Exhaustion::Warn
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn probe_error_aborts_immediately() {
        let policy = RetryPolicy::row_match();
        let mut calls = 0;

        let result: Result<RetryOutcome<()>, &str> = policy
            .run("rows", |_| {
                calls += 1;
                async { Err("timeout") }
            })
            .await;

        assert_eq!(result, Err("timeout"));
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_probes_once() {
        let policy = RetryPolicy::new(0, 10, Exhaustion::AbortRecord);
        let outcome = policy
            .run("once", |_| async { Ok::<_, ()>(Probe::Pending("x")) })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            RetryOutcome::Exhausted {
                last: "x",
                attempts: 1,
                policy: Exhaustion::AbortRecord
            }
        );
    }
}
