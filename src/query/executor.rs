//! Resolves queries against the job manager.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::protocol::{Query, QueryError, QueryRequest, QueryResponse};
use crate::jobs::{JobManager, JobView};

pub fn greeting(subject: &str) -> String {
    format!("Hello, {}", subject)
}

pub struct QueryExecutor {
    job_manager: Arc<JobManager>,
}

impl QueryExecutor {
    pub fn new(job_manager: Arc<JobManager>) -> Self {
        Self { job_manager }
    }

    pub fn execute(&self, request: &QueryRequest) -> QueryResponse {
        match self.resolve(&request.query) {
            Ok(data) => QueryResponse::data(data),
            Err(err) => {
                debug!("Query {} failed: {}", request.query.name(), err);
                QueryResponse::error(&err)
            }
        }
    }

    fn resolve(&self, query: &Query) -> Result<Value, QueryError> {
        match query {
            Query::SummaryCreate { result } => {
                check_selection(result)?;
                let view = self.job_manager.create_job();
                self.resolve_job(view, result)
            }
            Query::Job { id, result } => {
                check_selection(result)?;
                let view = self.job_manager.get_job(id)?;
                self.resolve_job(view, result)
            }
            Query::Greeting { subject } => Ok(Value::String(greeting(subject))),
        }
    }

    /// Evaluates `selection` into the job's result, if it has one.
    fn resolve_job(&self, mut view: JobView, selection: &[Query]) -> Result<Value, QueryError> {
        if let Some(result) = view.state.result.as_mut() {
            for nested in selection {
                // Same-named selections overwrite each other; the last one wins.
                result.insert(nested.name().to_string(), self.resolve(nested)?);
            }
        }
        Ok(serde_json::to_value(view)?)
    }
}

/// Rejects selections that would create jobs, at any depth, whether or not the
/// job is done yet.
fn check_selection(selection: &[Query]) -> Result<(), QueryError> {
    for nested in selection {
        if nested.is_mutation() {
            return Err(QueryError::NestedMutation(nested.name()));
        }
        if let Query::Job { result, .. } = nested {
            check_selection(result)?;
        }
    }
    Ok(())
}
