//! Job records and the resolver deriving their visible state.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// How long a job takes to complete unless configured otherwise.
pub const DEFAULT_JOB_DURATION_MS: u64 = 5_000;

/// Prefix of every generated job identifier.
pub const JOB_ID_PREFIX: &str = "job";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobDurationError {
    #[error("job duration must be greater than 0")]
    NotPositive,

    #[error("job duration is too large: {0}ms")]
    TooLarge(u64),
}

/// Time from creation until a job reports done. Always strictly positive, so
/// a freshly created job is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobDuration(TimeDelta);

impl JobDuration {
    pub fn as_delta(&self) -> TimeDelta {
        self.0
    }

    pub fn as_millis(&self) -> i64 {
        self.0.num_milliseconds()
    }
}

impl Default for JobDuration {
    fn default() -> Self {
        Self(TimeDelta::milliseconds(DEFAULT_JOB_DURATION_MS as i64))
    }
}

impl TryFrom<TimeDelta> for JobDuration {
    type Error = JobDurationError;

    fn try_from(delta: TimeDelta) -> Result<Self, Self::Error> {
        if delta <= TimeDelta::zero() {
            return Err(JobDurationError::NotPositive);
        }
        Ok(Self(delta))
    }
}

impl TryFrom<u64> for JobDuration {
    type Error = JobDurationError;

    fn try_from(millis: u64) -> Result<Self, Self::Error> {
        let delta = i64::try_from(millis)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .ok_or(JobDurationError::TooLarge(millis))?;
        Self::try_from(delta)
    }
}

/// Output of a completed job: a bag of named fields.
///
/// Empty unless the reader selected nested queries to be evaluated on it.
pub type JobResult = serde_json::Map<String, serde_json::Value>;

/// Generates a fresh opaque job identifier, e.g. `job_3f2a...`.
pub fn generate_job_id() -> String {
    format!("{}_{}", JOB_ID_PREFIX, Uuid::new_v4().simple())
}

/// A stored job. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: String,
    pub started_at: DateTime<Utc>,
}

impl JobRecord {
    pub fn finishes_at(&self, duration: TimeDelta) -> DateTime<Utc> {
        self.started_at
            .checked_add_signed(duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Completion state derived from a record at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobState {
    pub done: bool,
    pub result: Option<JobResult>,
}

impl JobState {
    pub fn pending() -> Self {
        Self {
            done: false,
            result: None,
        }
    }

    pub fn completed() -> Self {
        Self {
            done: true,
            result: Some(JobResult::new()),
        }
    }
}

/// Derives the state of `record` as seen at `now`.
///
/// A job is done once `duration` has elapsed since it started, and only a done
/// job carries a result.
pub fn resolve(record: &JobRecord, now: DateTime<Utc>, duration: TimeDelta) -> JobState {
    if now >= record.finishes_at(duration) {
        JobState::completed()
    } else {
        JobState::pending()
    }
}

/// What callers get back when creating or reading a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobView {
    pub id: String,
    #[serde(flatten)]
    pub state: JobState,
    pub started_at: DateTime<Utc>,
    pub finishes_at: DateTime<Utc>,
}

impl JobView {
    pub fn new(record: &JobRecord, state: JobState, duration: TimeDelta) -> Self {
        Self {
            id: record.id.clone(),
            state,
            started_at: record.started_at,
            finishes_at: record.finishes_at(duration),
        }
    }

    pub fn is_done(&self) -> bool {
        self.state.done
    }
}
