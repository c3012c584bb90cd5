// src/poller.rs

use std::time::Duration;

use tokio::time::sleep;

use crate::client::{CalcClient, ExpressionStatus};
use crate::errors::{ClientError, Result};

/// Polls an expression job until its result is available.
///
/// Each attempt fetches the job snapshot; a failed fetch of any kind is
/// discarded and retried after the fixed interval, as is a fetch that finds
/// the job not yet complete. The attempt bound keeps a permanently failing
/// fetch (dead server, revoked token) from spinning forever.
pub struct Poller {
    interval: Duration,
    max_attempts: usize,
}

impl Poller {
    pub fn new(interval: Duration, max_attempts: usize) -> Self {
        Self {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Probes the job once. `Ok(Some(result))` when the job is complete,
    /// `Ok(None)` when it exists but is not ready yet.
    pub async fn check(&self, client: &CalcClient, id: &str, token: &str) -> Result<Option<f64>> {
        let snapshot = client.expression_by_id(id, token).await?;
        log::debug!("expression {} is {}", id, snapshot.status);

        if snapshot.status == ExpressionStatus::Error {
            log::warn!(
                "expression {} finished in ERROR state: {}",
                id,
                snapshot.error.as_deref().unwrap_or("no detail")
            );
        }

        Ok(snapshot.result())
    }

    /// Blocks until the job completes and returns its numeric result.
    ///
    /// Failed fetches and not-ready snapshots both consume one attempt;
    /// exhausting the bound answers [`ClientError::PollTimedOut`].
    pub async fn wait_for_result(
        &self,
        client: &CalcClient,
        id: &str,
        token: &str,
    ) -> Result<f64> {
        for attempt in 1..=self.max_attempts {
            match self.check(client, id, token).await {
                Ok(Some(result)) => {
                    log::debug!("expression {} complete after {} attempt(s)", id, attempt);
                    return Ok(result);
                }
                Ok(None) => {
                    log::debug!("expression {} not ready (attempt {})", id, attempt);
                }
                Err(err) => {
                    log::debug!("fetch for {} failed, retrying: {}", id, err);
                }
            }

            if attempt < self.max_attempts {
                sleep(self.interval).await;
            }
        }

        log::warn!(
            "gave up on expression {} after {} attempts",
            id,
            self.max_attempts
        );
        Err(ClientError::PollTimedOut {
            attempts: self.max_attempts,
        })
    }
}
