//! Job lifecycle: records, time sources, storage and resolution.

mod clock;
mod job;
mod manager;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use job::{
    generate_job_id, resolve, JobDuration, JobDurationError, JobRecord, JobResult, JobState,
    JobView, DEFAULT_JOB_DURATION_MS, JOB_ID_PREFIX,
};
pub use manager::JobManager;
pub use store::{InMemoryJobStore, JobError, JobStore};
