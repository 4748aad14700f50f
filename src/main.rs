use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobs_server::config::{self, AppConfig, FileConfig};
use jobs_server::jobs::{JobManager, DEFAULT_JOB_DURATION_MS};
use jobs_server::server::{run_server, RequestsLoggingLevel};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The address to bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Milliseconds after creation at which a job reports done.
    #[clap(long, default_value_t = DEFAULT_JOB_DURATION_MS)]
    pub job_duration_ms: u64,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            host: args.host.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            job_duration_ms: args.job_duration_ms,
        }
    }
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

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&config::CliConfig::from(&cli_args), file_config)?;

    info!(
        "Jobs complete {}ms after creation",
        app_config.job_duration.as_millis()
    );
    let job_manager = Arc::new(JobManager::with_system_clock(app_config.job_duration));

    let shutdown_token = CancellationToken::new();
    let mut server = tokio::spawn(run_server(
        app_config.server_config(),
        job_manager,
        shutdown_token.clone(),
    ));

    info!("Ready to serve at port {}!", app_config.port);

    tokio::select! {
        result = &mut server => {
            info!("HTTP server stopped: {:?}", result);
            result.context("HTTP server task failed")?
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, initiating graceful shutdown");
            shutdown_token.cancel();
            server.await.context("HTTP server task failed")?
        }
    }
}
