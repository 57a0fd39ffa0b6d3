//! Poll-until-done loop for music provider jobs.
//!
//! The loop runs inside the request that started it. Each iteration waits
//! one interval and then reads the job status once. It ends on the first
//! successful `done` snapshot, on an upstream failure, or when one more
//! interval would overrun the budget.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use songbridge_core::polling::PollSettings;
use songbridge_core::types::{JobHandle, JobState, ResultRecord};
use tokio::time::Instant;

use crate::error::UpstreamError;
use crate::extract;

/// Anything that can read one status snapshot for a job.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// GET the status address and return the decoded body.
    ///
    /// Non-2xx and undecodable responses must be reported as errors, never
    /// as a pending snapshot.
    async fn fetch_status(&self, status_url: &str) -> Result<Value, UpstreamError>;
}

/// Decoded view of one status body.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub state: JobState,
    /// Explicit success flag; `None` when absent or not a boolean.
    pub success: Option<bool>,
    pub records: Vec<ResultRecord>,
    /// The body exactly as received.
    pub body: Value,
}

impl JobStatus {
    pub fn from_body(body: Value) -> Self {
        let state = extract::string_at(&body, &[&["status"], &["data", "status"]])
            .map(|s| JobState::from_upstream(&s))
            .unwrap_or(JobState::Unknown);
        Self {
            state,
            success: extract::bool_at(&body, &[&["success"]]),
            records: extract::job_records(&body),
            body,
        }
    }

    /// Terminal success needs both `done` and an explicit `success: true`.
    pub fn is_complete(&self) -> bool {
        self.state == JobState::Done && self.success == Some(true)
    }
}

/// A job that reached terminal success.
#[derive(Debug, Clone)]
pub struct PolledJob {
    pub status: JobStatus,
    pub polls: u32,
    pub elapsed: Duration,
}

/// Everything a caller needs to resume polling by hand after a timeout.
#[derive(Debug, Clone)]
pub struct PollTimeout {
    pub job_id: String,
    pub status_url: String,
    /// Last decoded status body, if any poll completed.
    pub last_status: Option<Value>,
    pub polls: u32,
    pub elapsed: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Timed out after {} polls waiting for job {}", .0.polls, .0.job_id)]
    TimedOut(Box<PollTimeout>),
}

/// Poll `job.status_url` until the job is done or the budget runs out.
///
/// The first wait is `min(interval, timeout)`, so at least one poll always
/// happens. After that, another round starts only if
/// `elapsed + interval <= timeout`.
pub async fn poll_until_done<S>(
    source: &S,
    job: &JobHandle,
    settings: PollSettings,
) -> Result<PolledJob, PollError>
where
    S: StatusSource + ?Sized,
{
    let started = Instant::now();
    let mut polls = 0u32;
    let mut last_status: Option<Value> = None;

    loop {
        let wait = if polls == 0 {
            settings.interval.min(settings.timeout)
        } else {
            let elapsed = started.elapsed();
            if elapsed + settings.interval > settings.timeout {
                tracing::warn!(
                    job_id = %job.job_id,
                    polls,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Polling budget exhausted",
                );
                return Err(PollError::TimedOut(Box::new(PollTimeout {
                    job_id: job.job_id.clone(),
                    status_url: job.status_url.clone(),
                    last_status,
                    polls,
                    elapsed,
                })));
            }
            settings.interval
        };

        tokio::time::sleep(wait).await;
        polls += 1;

        let body = source.fetch_status(&job.status_url).await.map_err(|e| {
            tracing::warn!(job_id = %job.job_id, poll = polls, error = %e, "Status poll failed");
            e
        })?;
        let status = JobStatus::from_body(body);

        tracing::debug!(
            job_id = %job.job_id,
            poll = polls,
            status = status.state.as_str(),
            success = ?status.success,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Polled job status",
        );

        if status.is_complete() {
            return Ok(PolledJob {
                status,
                polls,
                elapsed: started.elapsed(),
            });
        }
        last_status = Some(status.body);
    }
}
