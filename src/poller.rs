//! Polls submitted batches until every one reaches a terminal state.

use std::time::Duration;

use tokio::time::sleep;

use crate::api::{ImportApi, JobHandle, JobStatus};
use crate::error::SyncError;
use crate::ui::PollProgress;

/// Pacing and budget for the status polling loop.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Delay between polling rounds.
    pub interval: Duration,

    /// Round budget. `None` polls until the platform settles; the platform
    /// offers no push channel, so an unresponsive backend keeps the loop
    /// alive indefinitely.
    pub max_rounds: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_rounds: None,
        }
    }
}

/// Re-queries the full handle set until every status is DONE or FAILURE.
///
/// Each round issues one batched query covering all handles; the ones that
/// already settled are harmlessly included again. Returns the statuses of
/// the settling round, in the order the platform reported them.
pub async fn await_all(
    api: &impl ImportApi,
    organization_id: &str,
    handles: &[JobHandle],
    policy: &PollPolicy,
    progress: Option<&PollProgress>,
) -> Result<Vec<JobStatus>, SyncError> {
    let mut round: u32 = 0;

    loop {
        round += 1;
        let statuses = api.statuses(organization_id, handles).await?;

        if statuses.iter().all(|s| s.import_status.is_terminal()) {
            return Ok(statuses);
        }

        if let Some(max) = policy.max_rounds {
            if round >= max {
                return Err(SyncError::PollBudgetExhausted { rounds: round });
            }
        }

        if let Some(progress) = progress {
            progress.round(round);
        }
        sleep(policy.interval).await;
    }
}
