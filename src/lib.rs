//! Pollable Jobs Server Library
//!
//! Long-running work modeled as a queryable resource: a job is created, its
//! identifier handed back, and the caller polls until the job reports done.
//!
//! This library exposes the internal modules for testing and for the
//! walkthrough binary.

pub mod config;
pub mod jobs;
pub mod query;
pub mod server;

// Re-export commonly used types for convenience
pub use jobs::{Clock, InMemoryJobStore, JobError, JobManager, JobStore, JobView, SystemClock};
pub use query::{Query, QueryExecutor, QueryRequest, QueryResponse};
pub use server::{run_server, RequestsLoggingLevel};
