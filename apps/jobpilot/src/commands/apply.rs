use std::path::PathBuf;

use clap::Args;

use super::DEFAULT_TRACKER;
use crate::apply::{run_apply, ApplyRequest};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::Platform;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[arg(long)]
    pub url: String,

    #[arg(long, value_enum)]
    pub platform: Platform,

    /// Tailored résumé to upload
    #[arg(long)]
    pub resume: PathBuf,

    #[arg(long, default_value = DEFAULT_TRACKER)]
    pub tracker: PathBuf,

    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,
}

/// Exits 0 whenever an outcome was recorded, including Manual Review Needed
/// and Error: the tracker row is the result.
pub async fn run(config: &Config, args: ApplyArgs) -> Result<(), AppError> {
    let request = ApplyRequest {
        job_url: args.url,
        platform: args.platform,
        resume_path: args.resume,
        tracker_path: args.tracker,
        headless: args.headless,
    };
    let outcome = run_apply(config, &request).await?;
    match outcome.notes() {
        "" => println!("Outcome: {}", outcome.status()),
        notes => println!("Outcome: {} ({notes})", outcome.status()),
    }
    Ok(())
}
