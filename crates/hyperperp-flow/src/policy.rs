/*
[INPUT]:  An async existence check and a one-shot fallback action
[OUTPUT]: Activation confirmed within budget, or FlowError::Activation
[POS]:    Provisioning support - explicit polling policy
[UPDATE]: When changing the polling schedule or fallback behavior
*/

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::FlowError;

/// Fixed-interval polling budget with a single-shot fallback.
///
/// The policy drives the activation wait: `max_attempts` existence checks
/// spaced `interval` apart, short-circuiting on the first confirmation.
/// When the budget is exhausted the fallback runs exactly once, followed by
/// one more interval and one final check. No backoff, by contract with the
/// exchange's recognition latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 20,
        }
    }
}

impl ActivationPolicy {
    /// Poll `check` until it confirms, the budget runs out, or it errors.
    ///
    /// Errors from `check` and `fallback` propagate immediately; only a
    /// still-unconfirmed final check maps to `FlowError::Activation`.
    pub async fn wait_for<C, CF, F, FF>(&self, mut check: C, fallback: F) -> Result<(), FlowError>
    where
        C: FnMut() -> CF,
        CF: Future<Output = Result<bool, FlowError>>,
        F: FnOnce() -> FF,
        FF: Future<Output = Result<(), FlowError>>,
    {
        for attempt in 1..=self.max_attempts {
            if check().await? {
                debug!(attempt, "activation confirmed");
                return Ok(());
            }
            debug!(attempt, max_attempts = self.max_attempts, "not yet active");
            tokio::time::sleep(self.interval).await;
        }

        warn!(
            attempts = self.max_attempts,
            "activation unconfirmed after polling budget, running fallback"
        );
        fallback().await?;
        tokio::time::sleep(self.interval).await;

        if check().await? {
            debug!("activation confirmed after fallback");
            Ok(())
        } else {
            Err(FlowError::Activation)
        }
    }
}
