//! Notion/arXiv sync - Entry Point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use notion_arxiv_sync::config::{Endpoints, RunMode, Settings};
use notion_arxiv_sync::sync::{self, RunOutcome};

#[derive(Parser, Debug)]
#[command(name = "notion-arxiv-sync")]
#[command(about = "Sync arXiv paper authors into a Notion database")]
#[command(version)]
struct Cli {
    /// Search arXiv for recent papers instead of syncing the database
    #[arg(long)]
    discover: bool,

    /// Path to the YAML settings file
    #[arg(long, default_value = "config.yaml", env = "NOTION_ARXIV_SYNC_CONFIG")]
    config: PathBuf,

    /// Directory the JSON output files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mode = if cli.discover {
        RunMode::Discover
    } else {
        RunMode::Sync
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        mode = ?mode,
        "Starting notion-arxiv-sync"
    );

    let settings = Settings::load(&cli.config, mode)?;

    match sync::run(mode, &settings, &Endpoints::default(), &cli.output_dir).await? {
        RunOutcome::Synced(report) => {
            for failure in &report.failures {
                tracing::warn!(
                    row_id = failure.row_id(),
                    title = failure.title(),
                    "Row not updated: {failure}"
                );
            }

            if !report.is_clean() {
                tracing::error!(
                    failed = report.failures.len(),
                    updated = report.updated,
                    "Some rows could not be synced"
                );
                return Ok(ExitCode::FAILURE);
            }

            tracing::info!(updated = report.updated, "Database updated successfully");
        }
        RunOutcome::Discovered(report) => {
            tracing::info!(
                count = report.count,
                path = %report.output.display(),
                "Paper list saved"
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
