//! Stretch worker CLI.
//!
//! Decodes radar GIF frames and renders viewports of them to PNG.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stretch_worker::cli::{self, Args};
use stretch_worker::{FrameService, WorkerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = WorkerConfig::from_env();
    if let Some(n) = args.max_concurrency {
        config.max_concurrency = n;
    }
    config.validate().map_err(anyhow::Error::msg)?;

    info!(max_concurrency = config.max_concurrency, "Starting stretch worker");

    let service = FrameService::new(config);
    let report = cli::execute(&service, args.command).await?;
    println!("{}", report);

    info!(metrics = ?service.metrics().snapshot(), "Done");
    Ok(())
}
