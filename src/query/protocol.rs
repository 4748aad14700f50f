//! Query request/response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::jobs::JobError;

// ============================================================================
// Requests
// ============================================================================

/// Incoming query envelope.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueryRequest {
    pub query: Query,
}

/// One operation, tagged by `op`.
///
/// `result` is a selection of nested queries evaluated into the job's result
/// once the job is done.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "op")]
pub enum Query {
    #[serde(rename = "summaryCreate")]
    SummaryCreate {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        result: Vec<Query>,
    },
    #[serde(rename = "job")]
    Job {
        id: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        result: Vec<Query>,
    },
    #[serde(rename = "greeting")]
    Greeting { subject: String },
}

impl Query {
    pub fn name(&self) -> &'static str {
        match self {
            Query::SummaryCreate { .. } => "summaryCreate",
            Query::Job { .. } => "job",
            Query::Greeting { .. } => "greeting",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(self, Query::SummaryCreate { .. })
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Outgoing query envelope.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct QueryResponse {
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<QueryErrorBody>,
}

impl QueryResponse {
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn error(error: &QueryError) -> Self {
        Self {
            data: None,
            errors: vec![QueryErrorBody::from(error)],
        }
    }

    /// Identifier of the job carried in `data`, if any.
    pub fn job_id(&self) -> Option<&str> {
        self.data.as_ref()?.get("id")?.as_str()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct QueryErrorBody {
    pub message: String,
    pub code: String,
}

impl From<&QueryError> for QueryErrorBody {
    fn from(error: &QueryError) -> Self {
        Self {
            message: error.to_string(),
            code: error.code().to_string(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while resolving a query.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Job(#[from] JobError),

    #[error("{0} cannot be selected inside a job result")]
    NestedMutation(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueryError {
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::Job(JobError::NotFound(_)) => "NOT_FOUND",
            QueryError::NestedMutation(_) => "BAD_REQUEST",
            QueryError::Serialization(_) => "INTERNAL",
        }
    }
}
