//! `run`: the orchestrator. Tailoring and applying run as child processes of
//! this same binary, so each step gets its own clean exit status and a
//! crashed browser session cannot take the pipeline down with it.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use tokio::process::Command;
use tracing::{error, info, warn};

use super::{DEFAULT_BASE_RESUME, DEFAULT_RESUMES_DIR, DEFAULT_TRACKER, RUN_ID_ENV};
use crate::config::Config;
use crate::errors::AppError;
use crate::models::Platform;
use crate::tailoring::resume_filename;

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long)]
    pub company: String,

    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub url: String,

    #[arg(long, value_enum, default_value_t = Platform::Generic)]
    pub platform: Platform,

    /// Path to a job description file, or the description itself
    #[arg(long)]
    pub job_desc: String,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, default_value = "")]
    pub salary: String,

    /// Also run the apply step after tailoring
    #[arg(long)]
    pub apply: bool,

    #[arg(long, default_value = DEFAULT_BASE_RESUME)]
    pub resume: PathBuf,

    #[arg(long)]
    pub headless: bool,

    #[arg(long, default_value = DEFAULT_TRACKER)]
    pub tracker: PathBuf,

    #[arg(long, default_value = DEFAULT_RESUMES_DIR)]
    pub out_dir: PathBuf,
}

pub async fn run(
    config: &Config,
    config_path: Option<&Path>,
    run_id: &str,
    args: RunArgs,
) -> Result<(), AppError> {
    let api_key = config.require_api_key()?;
    // Apply credentials are checked before anything is written
    if args.apply && !args.url.trim().is_empty() && args.platform == Platform::LinkedIn {
        config.linkedin_credentials()?;
    }
    let exe = std::env::current_exe().context("cannot locate the jobpilot executable")?;

    let mut tailor = step_command(&exe, config_path, run_id);
    tailor
        .env("GROQ_API_KEY", api_key)
        .arg("tailor")
        .arg("--resume")
        .arg(&args.resume)
        .args(["--job-desc", args.job_desc.as_str()])
        .args(["--company", args.company.as_str()])
        .args(["--title", args.title.as_str()])
        .args(["--platform", args.platform.cli_value()])
        .args(["--url", args.url.as_str()])
        .args(["--location", args.location.as_str()])
        .args(["--salary", args.salary.as_str()])
        .arg("--tracker")
        .arg(&args.tracker)
        .arg("--out-dir")
        .arg(&args.out_dir);
    run_step(tailor, "Tailoring resume & logging to tracker").await?;

    let resume = locate_resume(
        &args.out_dir,
        &args.company,
        &args.title,
        Local::now().date_naive(),
    )?;
    info!("Tailored resume: {}", resume.display());

    if args.apply {
        if args.url.trim().is_empty() {
            warn!("--url is required for auto-apply. Skipping.");
        } else {
            let mut apply = step_command(&exe, config_path, run_id);
            apply
                .arg("apply")
                .args(["--url", args.url.as_str()])
                .args(["--platform", args.platform.cli_value()])
                .arg("--resume")
                .arg(&resume)
                .arg("--tracker")
                .arg(&args.tracker);
            if args.headless {
                apply.arg("--headless");
            }
            let label = format!("Auto-applying on {}", args.platform.label());
            if let Err(e) = run_step(apply, &label).await {
                error!("{e}");
            }
        }
    } else {
        info!("Tip: add --apply to also submit the application.");
        info!("Or upload manually: {}", resume.display());
    }

    info!("All done! Check your tracker: {}", args.tracker.display());
    Ok(())
}

fn step_command(exe: &Path, config_path: Option<&Path>, run_id: &str) -> Command {
    let mut cmd = Command::new(exe);
    cmd.env(RUN_ID_ENV, run_id)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(path) = config_path {
        cmd.arg("--config").arg(path);
    }
    cmd
}

async fn run_step(mut cmd: Command, label: &str) -> Result<(), AppError> {
    info!("▶ {label}");
    let status = cmd.status().await?;
    if status.success() {
        return Ok(());
    }
    let err = AppError::Step {
        step: label.to_string(),
        code: status.code().unwrap_or(-1),
    };
    error!("{err}");
    Err(err)
}

/// The document the tailor step wrote: the deterministic filename for
/// today, or failing that the newest `.docx` in `out_dir`.
pub fn locate_resume(
    out_dir: &Path,
    company: &str,
    title: &str,
    today: NaiveDate,
) -> Result<PathBuf, AppError> {
    let expected = out_dir.join(resume_filename(company, title, today));
    if expected.is_file() {
        return Ok(expected);
    }

    let newest = std::fs::read_dir(out_dir)
        .ok()
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
        })
        .filter_map(|path| {
            let modified = path.metadata().and_then(|m| m.modified()).ok()?;
            Some((modified, path))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path);

    newest.ok_or_else(|| {
        AppError::Document(format!(
            "Could not find tailored resume file in {}",
            out_dir.display()
        ))
    })
}
