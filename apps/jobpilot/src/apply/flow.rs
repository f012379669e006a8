use tracing::{debug, info, warn};

use super::form::fill_step;
use super::outcome::StepOutcome;
use super::strategies::{
    advance_buttons, easy_apply_buttons, looks_like_easy_apply, modal_markers, submit_buttons,
};
use super::ApplyTimings;
use crate::browser::{BrowserError, Element, Page};
use crate::config::ApplicantProfile;

/// The Easy Apply walk on an already logged-in page: open the form, then
/// fill, submit or advance until the step bound runs out.
pub struct EasyApplyFlow<'a, P: Page> {
    page: &'a P,
    profile: &'a ApplicantProfile,
    resume_path: &'a str,
    timings: &'a ApplyTimings,
}

impl<'a, P: Page> EasyApplyFlow<'a, P> {
    pub fn new(
        page: &'a P,
        profile: &'a ApplicantProfile,
        resume_path: &'a str,
        timings: &'a ApplyTimings,
    ) -> Self {
        Self {
            page,
            profile,
            resume_path,
            timings,
        }
    }

    /// `Succeeded` once a submit control was clicked, `NeedsManualStep` when
    /// the form stalled, `Failed` when no form ever opened. Only a broken
    /// browser session is an error.
    pub async fn run(&self, job_url: &str) -> Result<StepOutcome, BrowserError> {
        self.page.goto(job_url).await?;
        tokio::time::sleep(self.timings.page_settle).await;

        info!("Looking for Easy Apply button...");
        if self.open_form().await == StepOutcome::NeedsManualStep {
            warn!(
                "Could not auto-click. PLEASE CLICK 'Easy Apply' NOW (waiting up to {}s)",
                self.timings.modal_timeout.as_secs()
            );
        }

        info!("Waiting for application form to open...");
        if !self.await_modal().await {
            warn!("Form not detected. Try clicking Easy Apply manually.");
            return Ok(StepOutcome::Failed(
                "application form not detected".to_string(),
            ));
        }
        info!("Form opened, filling in details...");

        for step in 1..=self.timings.step_bound {
            tokio::time::sleep(self.timings.step_settle).await;
            fill_step(
                self.page,
                self.profile,
                self.resume_path,
                self.timings.upload_settle,
            )
            .await;

            if self.submit().await {
                return Ok(StepOutcome::Succeeded);
            }
            if !self.advance().await {
                warn!("Stuck on step {step}: please continue manually if needed");
                tokio::time::sleep(self.timings.manual_pause).await;
                if self.submit().await {
                    return Ok(StepOutcome::Succeeded);
                }
                return Ok(StepOutcome::NeedsManualStep);
            }
            debug!("Advanced past step {step}");
        }

        warn!(
            "Step bound of {} reached without a submit control",
            self.timings.step_bound
        );
        Ok(StepOutcome::NeedsManualStep)
    }

    /// Clicks the Easy Apply control, falling back to a script scan of every
    /// button. `NeedsManualStep` means the operator has to click it.
    pub async fn open_form(&self) -> StepOutcome {
        if let Some(button) = easy_apply_buttons()
            .first_match_where(self.page, &looks_like_easy_apply)
            .await
        {
            match button.click().await {
                Ok(()) => {
                    info!("Clicked Easy Apply button");
                    return StepOutcome::Succeeded;
                }
                Err(e) => debug!("Easy Apply click failed: {e}"),
            }
        }

        match self.page.click_button_with_text("easy apply").await {
            Ok(true) => {
                info!("Clicked Easy Apply via script scan");
                StepOutcome::Succeeded
            }
            Ok(false) => StepOutcome::NeedsManualStep,
            Err(e) => {
                debug!("Script scan failed: {e}");
                StepOutcome::NeedsManualStep
            }
        }
    }

    /// Polls for the modal for up to `modal_timeout`.
    pub async fn await_modal(&self) -> bool {
        let markers = modal_markers();
        for attempt in 0..self.modal_attempts() {
            if attempt > 0 {
                tokio::time::sleep(self.timings.poll_interval).await;
            }
            if markers.first_match(self.page).await.is_some() {
                return true;
            }
        }
        false
    }

    fn modal_attempts(&self) -> u128 {
        let poll = self.timings.poll_interval.as_millis();
        if poll == 0 {
            return 1;
        }
        (self.timings.modal_timeout.as_millis() / poll).max(1)
    }

    async fn submit(&self) -> bool {
        let Some(button) = submit_buttons().first_match(self.page).await else {
            return false;
        };
        match button.click().await {
            Ok(()) => {
                tokio::time::sleep(self.timings.submit_settle).await;
                info!("Application submitted");
                true
            }
            Err(e) => {
                debug!("Submit click failed: {e}");
                false
            }
        }
    }

    async fn advance(&self) -> bool {
        let Some(button) = advance_buttons().first_match(self.page).await else {
            return false;
        };
        match button.click().await {
            Ok(()) => {
                tokio::time::sleep(self.timings.advance_settle).await;
                true
            }
            Err(e) => {
                debug!("Advance click failed: {e}");
                false
            }
        }
    }
}
