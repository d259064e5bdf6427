//! Bounded fixed-interval polling of assistant runs

use crate::assistant::{AssistantApi, RunStatus};
use crate::config::PollingConfig;
use crate::error::{RelayError, RelayResult};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// How often, and for how long, a run's status is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between consecutive status checks
    pub interval: Duration,
    /// Upper bound on total polling time
    pub max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from(&PollingConfig::default())
    }
}

impl From<&PollingConfig> for PollPolicy {
    fn from(config: &PollingConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            max_wait: Duration::from_secs(config.max_wait_seconds),
        }
    }
}

/// Poll a run until it reaches a terminal status
///
/// Checks the status immediately, then once per `policy.interval`. The
/// wait suspends only the calling task.
///
/// # Returns
///
/// The number of status checks issued when the run completed
///
/// # Errors
///
/// - `RelayError::RunFailed` when the run ends in any terminal status other
///   than `completed`
/// - `RelayError::Timeout` when the next wait would exceed `policy.max_wait`
/// - Any error from `get_run_status`, without retrying
pub async fn poll_run(
    api: &dyn AssistantApi,
    thread_id: &str,
    run_id: &str,
    policy: &PollPolicy,
) -> RelayResult<u32> {
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        let status = api.get_run_status(thread_id, run_id).await?;
        tracing::debug!(attempt = attempts, status = %status, "Polled run status");

        match status {
            RunStatus::Completed => return Ok(attempts),
            status if status.is_terminal() => {
                tracing::warn!(status = %status, "Run ended without completing");
                return Err(RelayError::RunFailed { status });
            }
            _ => {}
        }

        let elapsed = started.elapsed();
        if elapsed + policy.interval > policy.max_wait {
            tracing::warn!(
                attempts,
                waited_ms = elapsed.as_millis() as u64,
                "Run did not reach a terminal status in time"
            );
            return Err(RelayError::Timeout {
                waited_ms: elapsed.as_millis(),
                attempts,
            });
        }

        sleep(policy.interval).await;
    }
}
