mod apply;
mod browser;
mod commands;
mod config;
mod errors;
mod llm_client;
mod models;
mod render;
mod tailoring;
mod tracker;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::commands::{Command, RUN_ID_ENV};
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "jobpilot", version)]
#[command(about = "Tailor résumés with an LLM, track applications, and fill Easy Apply forms")]
struct Cli {
    /// Path to the JSON config file (defaults to ./config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    let Cli {
        config: config_path,
        command,
    } = Cli::parse();

    // Configuration comes first: it carries the log level
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.log_level))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Children of an orchestrated run log under their parent's id
    let run_id = std::env::var(RUN_ID_ENV)
        .ok()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = info_span!("run", run_id = %run_id);

    let result = async {
        info!("jobpilot v{}", env!("CARGO_PKG_VERSION"));
        commands::execute(command, &config, config_path.as_deref(), &run_id).await
    }
    .instrument(span)
    .await;

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(e.exit_code());
    }
}
