use anyhow::{Context, Result};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use axum::{
    extract::{Path, Query as UrlQuery, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, ServerConfig};
use crate::jobs::JobError;
use crate::query::{greeting, QueryRequest};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: &'static str,
    pub jobs_count: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
struct GreetingResponse {
    pub greeting: String,
}

#[derive(Deserialize, Debug)]
struct GreetingParams {
    pub subject: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION"),
        jobs_count: state.job_manager.jobs_count(),
    };
    Json(stats)
}

async fn post_job(State(job_manager): State<GuardedJobManager>) -> Response {
    let job = job_manager.create_job();
    (StatusCode::CREATED, Json(job)).into_response()
}

async fn get_job(State(job_manager): State<GuardedJobManager>, Path(id): Path<String>) -> Response {
    match job_manager.get_job(&id) {
        Ok(job) => Json(job).into_response(),
        Err(err @ JobError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}

async fn get_greeting(UrlQuery(params): UrlQuery<GreetingParams>) -> Response {
    Json(GreetingResponse {
        greeting: greeting(&params.subject),
    })
    .into_response()
}

async fn post_query(
    State(executor): State<GuardedQueryExecutor>,
    Json(request): Json<QueryRequest>,
) -> Response {
    Json(executor.execute(&request)).into_response()
}

pub fn make_app(config: ServerConfig, job_manager: GuardedJobManager) -> Router {
    let state = ServerState::new(config, job_manager);

    let job_routes: Router = Router::new()
        .route("/", post(post_job))
        .route("/{id}", get(get_job))
        .with_state(state.clone());

    let api_routes: Router = Router::new()
        .route("/query", post(post_query))
        .route("/greeting", get(get_greeting))
        .with_state(state.clone())
        .nest("/jobs", job_routes);

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    home_router
        .nest("/v1", api_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    job_manager: GuardedJobManager,
    shutdown: CancellationToken,
) -> Result<()> {
    let address = config.bind_address();
    let app = make_app(config, job_manager);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
