//! Job storage trait and its in-memory implementation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;

use super::clock::Clock;
use super::job::{generate_job_id, JobRecord};

/// Errors that can occur when looking up jobs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("No such job: {0}")]
    NotFound(String),
}

/// Trait for job storage backends.
///
/// Stores are append-only: a record is inserted once and never updated or
/// removed.
pub trait JobStore: Send + Sync {
    /// Create a job starting now and return its stored record.
    fn create(&self) -> JobRecord;

    /// Get a job by ID.
    fn get(&self, id: &str) -> Result<JobRecord, JobError>;

    /// Number of jobs stored so far.
    fn count(&self) -> usize;
}

/// Process-lifetime job store backed by a `HashMap`.
pub struct InMemoryJobStore {
    jobs: RwLock<HashMap<String, JobRecord>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryJobStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

impl JobStore for InMemoryJobStore {
    fn create(&self) -> JobRecord {
        // Records are never mutated, so a poisoned map is still consistent.
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Entry::Vacant(entry) = jobs.entry(generate_job_id()) {
                let record = JobRecord {
                    id: entry.key().clone(),
                    started_at: self.clock.now(),
                };
                entry.insert(record.clone());
                return record;
            }
        }
    }

    fn get(&self, id: &str) -> Result<JobRecord, JobError> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }

    fn count(&self) -> usize {
        self.jobs.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
