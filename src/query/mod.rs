//! Typed query interface over jobs.
//!
//! A request carries one [`Query`]; the response wraps either its data or the
//! errors raised while resolving it.

mod executor;
mod protocol;

pub use executor::{greeting, QueryExecutor};
pub use protocol::{Query, QueryError, QueryErrorBody, QueryRequest, QueryResponse};
