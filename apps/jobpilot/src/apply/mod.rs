//! Apply: drives a browser through an Easy Apply form and records the
//! outcome in the tracker.
//!
//! Every attempt ends in exactly one `ApplyOutcome`, which is written back to
//! the tracker row whose Job URL contains the requested URL. Configuration
//! problems are the only errors that escape, and they are raised before a
//! browser is started.

pub mod flow;
pub mod form;
pub mod linkedin;
pub mod outcome;
pub mod strategies;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::browser::{Page, WebDriverPage};
use crate::config::{ApplicantProfile, Config};
use crate::errors::AppError;
use crate::models::Platform;
use crate::tracker::record_outcome;
pub use flow::EasyApplyFlow;
pub use outcome::{ApplyOutcome, StepOutcome};

/// Waits and bounds of the heuristic. Built from `config::ApplyTuning`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyTimings {
    pub step_bound: u32,
    pub modal_timeout: Duration,
    pub poll_interval: Duration,
    pub page_settle: Duration,
    pub step_settle: Duration,
    pub upload_settle: Duration,
    pub advance_settle: Duration,
    pub submit_settle: Duration,
    pub manual_pause: Duration,
    pub close_delay: Duration,
}

impl ApplyTimings {
    /// No waiting at all; the step bound is kept.
    #[cfg(test)]
    pub fn instant() -> Self {
        Self {
            step_bound: 10,
            modal_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
            page_settle: Duration::ZERO,
            step_settle: Duration::ZERO,
            upload_settle: Duration::ZERO,
            advance_settle: Duration::ZERO,
            submit_settle: Duration::ZERO,
            manual_pause: Duration::ZERO,
            close_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub job_url: String,
    pub platform: Platform,
    pub resume_path: PathBuf,
    pub tracker_path: PathBuf,
    pub headless: bool,
}

/// Runs one apply attempt end to end and records the outcome.
pub async fn run_apply(config: &Config, request: &ApplyRequest) -> Result<ApplyOutcome, AppError> {
    if request.job_url.trim().is_empty() {
        return Err(AppError::Validation("job URL cannot be empty".to_string()));
    }

    if request.platform != Platform::LinkedIn {
        info!(
            "{} applications are not automated; leaving {} for manual review",
            request.platform.label(),
            request.job_url
        );
        let outcome = ApplyOutcome::ManualReviewNeeded("platform not automated".to_string());
        record(request, &outcome);
        return Ok(outcome);
    }

    let (email, password) = config.linkedin_credentials()?;
    let resume_path = absolute_resume_path(&request.resume_path)?;
    let timings = config.apply.timings();
    let profile = config.profile();

    let outcome = match WebDriverPage::connect(&config.webdriver_url, request.headless).await {
        Ok(page) => {
            let outcome = drive_linkedin(
                &page,
                &request.job_url,
                (email, password),
                &profile,
                &resume_path,
                &timings,
            )
            .await;
            info!(
                "Done. Closing browser in {}s...",
                timings.close_delay.as_secs()
            );
            tokio::time::sleep(timings.close_delay).await;
            page.quit().await;
            outcome
        }
        Err(e) => {
            error!("{e}");
            ApplyOutcome::Error(e.to_string())
        }
    };

    record(request, &outcome);
    Ok(outcome)
}

/// Login, then the Easy Apply flow. Never fails: a broken session becomes
/// `ApplyOutcome::Error`.
pub async fn drive_linkedin<P: Page>(
    page: &P,
    job_url: &str,
    credentials: (&str, &str),
    profile: &ApplicantProfile,
    resume_path: &str,
    timings: &ApplyTimings,
) -> ApplyOutcome {
    if let Err(e) = page.hide_automation().await {
        debug!("Could not mask navigator.webdriver: {e}");
    }
    linkedin::login(page, credentials.0, credentials.1, timings.step_settle).await;

    match EasyApplyFlow::new(page, profile, resume_path, timings)
        .run(job_url)
        .await
    {
        Ok(step) => ApplyOutcome::from(step),
        Err(e) => {
            error!("Apply failed: {e}");
            ApplyOutcome::Error(e.to_string())
        }
    }
}

fn record(request: &ApplyRequest, outcome: &ApplyOutcome) {
    info!("Apply outcome for {}: {}", request.job_url, outcome.status());
    record_outcome(
        &request.tracker_path,
        &request.job_url,
        outcome.status(),
        outcome.notes(),
    );
}

fn absolute_resume_path(path: &Path) -> Result<String, AppError> {
    let absolute = std::fs::canonicalize(path).map_err(|e| {
        AppError::Validation(format!("Resume {} is not readable: {e}", path.display()))
    })?;
    Ok(absolute.display().to_string())
}
