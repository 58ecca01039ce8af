//! Bounded, cancellable polling
//!
//! Every wait in the shell is a loop of at most `max_attempts` tries spaced
//! `interval` apart, racing a [`CancellationToken`] so that teardown stops it
//! promptly. Retryable errors count as a failed attempt; anything else ends
//! the wait.

use crate::error::ShellError;
use crate::integration::{check_linked, IntegrationShell};
use preview_grid::RecordSet;
use preview_source::{FetchOutcome, RecordSource};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default number of attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Default spacing between attempts
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// How often and how long to retry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Attempts before giving up, at least one is always made
    pub max_attempts: u32,
    /// Pause between attempts
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl RetryPolicy {
    /// Default policy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set attempt bound
    #[inline]
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set spacing
    #[inline]
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Attempts that will actually be made
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// Run `attempt` until it yields a value, the policy is spent, or `cancel` fires
///
/// `attempt` receives the 1-based attempt number and returns `Ok(None)` for
/// "not yet".
///
/// # Errors
/// - `ShellError::Cancelled` when `cancel` fires
/// - `ShellError::RetriesExhausted` when every attempt said "not yet" or
///   failed with a retryable error
/// - The first non-retryable error from `attempt`
pub async fn retry_until<T, F, Fut>(
    waiting_for: &'static str,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut attempt: F,
) -> Result<T, ShellError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, ShellError>>,
{
    let attempts = policy.attempts();

    for n in 1..=attempts {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(ShellError::Cancelled { waiting_for }),
            result = attempt(n) => result,
        };

        match result {
            Ok(Some(value)) => {
                tracing::debug!(waiting_for, attempt = n, "wait finished");
                return Ok(value);
            }
            Ok(None) => tracing::debug!(waiting_for, attempt = n, "not yet"),
            Err(e) if e.is_retryable() => {
                tracing::warn!(waiting_for, attempt = n, error = %e, "attempt failed, will retry");
            }
            Err(e) => return Err(e),
        }

        if n < attempts {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(ShellError::Cancelled { waiting_for }),
                () = tokio::time::sleep(policy.interval) => {}
            }
        }
    }

    tracing::warn!(waiting_for, attempts, "giving up");
    Err(ShellError::RetriesExhausted {
        waiting_for,
        attempts,
    })
}

/// Wait until the shell is mounted and `tenant_id` has linked `flow_id`
///
/// An unmounted shell counts as "not yet".
///
/// # Errors
/// See [`retry_until`]
pub async fn wait_for_link<S>(
    shell: &S,
    tenant_id: &str,
    flow_id: &str,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<(), ShellError>
where
    S: IntegrationShell + ?Sized,
{
    tracing::info!(tenant_id, flow_id, "waiting for linked flow");
    retry_until("linked flow", policy, cancel, |_| async move {
        if !shell.has_mounted() {
            return Ok(None);
        }
        let linked = check_linked(shell, tenant_id, flow_id).await?;
        Ok::<_, ShellError>(linked.then_some(()))
    })
    .await
}

/// Poll `source` until its output is ready
///
/// An empty record set counts as ready.
///
/// # Errors
/// See [`retry_until`]; non-recoverable source errors end the wait
pub async fn wait_for_records<S>(
    source: &S,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<RecordSet, ShellError>
where
    S: RecordSource + ?Sized,
{
    tracing::info!(source = %source.describe(), "waiting for sync output");
    retry_until("sync output", policy, cancel, |_| async move {
        let outcome = source.fetch().await.map_err(ShellError::from)?;
        Ok::<_, ShellError>(match outcome {
            FetchOutcome::Ready(records) => Some(records),
            FetchOutcome::NotReady { .. } => None,
        })
    })
    .await
}
