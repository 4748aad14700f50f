use axum::extract::FromRef;

use crate::jobs::JobManager;
use crate::query::QueryExecutor;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedJobManager = Arc<JobManager>;
pub type GuardedQueryExecutor = Arc<QueryExecutor>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub job_manager: GuardedJobManager,
    pub query_executor: GuardedQueryExecutor,
}

impl ServerState {
    pub fn new(config: ServerConfig, job_manager: GuardedJobManager) -> Self {
        let query_executor = Arc::new(QueryExecutor::new(job_manager.clone()));
        Self {
            config,
            start_time: Instant::now(),
            job_manager,
            query_executor,
        }
    }
}

impl FromRef<ServerState> for GuardedJobManager {
    fn from_ref(input: &ServerState) -> Self {
        input.job_manager.clone()
    }
}

impl FromRef<ServerState> for GuardedQueryExecutor {
    fn from_ref(input: &ServerState) -> Self {
        input.query_executor.clone()
    }
}
