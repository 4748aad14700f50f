use std::sync::Arc;

use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::job::{resolve, JobDuration, JobRecord, JobView};
use super::store::{InMemoryJobStore, JobError, JobStore};

/// Owns the job store and resolves jobs against the clock.
///
/// All job reads and writes from the server go through here.
pub struct JobManager {
    store: Arc<dyn JobStore>,
    clock: Arc<dyn Clock>,
    job_duration: JobDuration,
}

impl JobManager {
    pub fn new(
        store: Arc<dyn JobStore>,
        clock: Arc<dyn Clock>,
        job_duration: JobDuration,
    ) -> Self {
        Self {
            store,
            clock,
            job_duration,
        }
    }

    /// Manager with a fresh in-memory store driven by `clock`.
    pub fn in_memory(clock: Arc<dyn Clock>, job_duration: JobDuration) -> Self {
        let store = Arc::new(InMemoryJobStore::new(clock.clone()));
        Self::new(store, clock, job_duration)
    }

    /// Manager with a fresh in-memory store and the system clock.
    pub fn with_system_clock(job_duration: JobDuration) -> Self {
        Self::in_memory(Arc::new(SystemClock::new()), job_duration)
    }

    pub fn jobs_count(&self) -> usize {
        self.store.count()
    }

    /// Creates a job and returns its view. A new job is always pending.
    pub fn create_job(&self) -> JobView {
        let record = self.store.create();
        let view = self.view(&record);
        info!(
            "Created job {} (finishes at {})",
            view.id,
            view.finishes_at.to_rfc3339()
        );
        view
    }

    pub fn get_job(&self, id: &str) -> Result<JobView, JobError> {
        let record = self.store.get(id)?;
        let view = self.view(&record);
        debug!("Resolved job {} (done: {})", view.id, view.is_done());
        Ok(view)
    }

    fn view(&self, record: &JobRecord) -> JobView {
        let duration = self.job_duration.as_delta();
        let state = resolve(record, self.clock.now(), duration);
        JobView::new(record, state, duration)
    }
}
