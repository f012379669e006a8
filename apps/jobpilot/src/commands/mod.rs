//! CLI subcommands. Each handler takes the loaded `Config` and its parsed
//! arguments and returns `AppError` for `main` to turn into an exit code.

pub mod apply;
pub mod pipeline;
pub mod tailor;
pub mod tracker;

use std::path::Path;

use clap::Subcommand;

use crate::config::Config;
use crate::errors::AppError;

pub const DEFAULT_TRACKER: &str = "Job_Application_Tracker.xlsx";
pub const DEFAULT_RESUMES_DIR: &str = "resumes";
pub const DEFAULT_BASE_RESUME: &str = "base_resume.docx";

/// Correlates the child processes of one orchestrated run in the logs.
pub const RUN_ID_ENV: &str = "JOBPILOT_RUN_ID";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Tailor the base résumé to a job description and log it to the tracker
    Tailor(tailor::TailorArgs),

    /// Fill and submit an Easy Apply form, then record the outcome
    Apply(apply::ApplyArgs),

    /// Tailor, then optionally apply, as one pipeline
    Run(pipeline::RunArgs),

    /// Create an empty tracker workbook
    InitTracker(tracker::InitTrackerArgs),

    /// Print application counts per status
    Summary(tracker::SummaryArgs),
}

pub async fn execute(
    command: Command,
    config: &Config,
    config_path: Option<&Path>,
    run_id: &str,
) -> Result<(), AppError> {
    match command {
        Command::Tailor(args) => tailor::run(config, args).await,
        Command::Apply(args) => apply::run(config, args).await,
        Command::Run(args) => pipeline::run(config, config_path, run_id, args).await,
        Command::InitTracker(args) => tracker::init(config, args),
        Command::Summary(args) => tracker::summary(args),
    }
}
