//! Runs the create → poll → wait → poll sequence in-process and prints every
//! query response.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobs_server::jobs::{JobDuration, JobManager, DEFAULT_JOB_DURATION_MS};
use jobs_server::query::{Query, QueryExecutor, QueryRequest, QueryResponse};

/// Extra wait on top of the job duration so the last poll sees a done job.
const POLL_MARGIN_MS: u64 = 100;

#[derive(Parser, Debug)]
struct CliArgs {
    /// Milliseconds after creation at which the job reports done.
    #[clap(long, default_value_t = DEFAULT_JOB_DURATION_MS)]
    pub job_duration_ms: u64,

    /// Subject of the greeting selected inside the job result.
    #[clap(long, default_value = "world")]
    pub subject: String,
}

fn run_step(executor: &QueryExecutor, title: &str, query: Query) -> Result<QueryResponse> {
    info!("{}", title);
    let response = executor.execute(&QueryRequest { query });
    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to format response")?
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let job_duration = JobDuration::try_from(cli_args.job_duration_ms)
        .map_err(|e| anyhow!("Invalid --job-duration-ms: {}", e))?;

    let executor = QueryExecutor::new(Arc::new(JobManager::with_system_clock(job_duration)));

    let created = run_step(
        &executor,
        "Creating job",
        Query::SummaryCreate { result: vec![] },
    )?;
    let job_id = created
        .job_id()
        .map(str::to_string)
        .context("Job creation returned no id")?;
    info!("Created job: {}", job_id);

    let poll = Query::Job {
        id: job_id,
        result: vec![Query::Greeting {
            subject: cli_args.subject,
        }],
    };

    run_step(&executor, "Querying job (not yet complete)", poll.clone())?;

    let wait = Duration::from_millis(cli_args.job_duration_ms.saturating_add(POLL_MARGIN_MS));
    info!("Waiting {}ms for the job to complete...", wait.as_millis());
    tokio::time::sleep(wait).await;

    run_step(&executor, "Querying job (complete)", poll)?;

    Ok(())
}
