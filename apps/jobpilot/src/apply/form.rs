//! One pass of form filling over whatever step of the modal is showing.
//!
//! Nothing in here fails: every lookup that misses is logged at debug level
//! and skipped, so a partially understood form still gets what we know.

use std::time::Duration;

use tracing::{debug, info};

use super::strategies::{phone_inputs, radio_xpath, FILE_INPUT_XPATH};
use crate::browser::{BrowserError, Element, Locator, Page};
use crate::config::ApplicantProfile;

/// Input types a label match must never type into.
const SKIPPED_INPUT_TYPES: [&str; 4] = ["file", "hidden", "checkbox", "radio"];

/// What a fill pass managed to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport {
    pub resume_uploaded: bool,
    pub phone_filled: bool,
    pub labelled_inputs: usize,
    pub choices: usize,
}

/// Config value for a label, by keyword containment (first keyword wins).
pub fn label_value<'a>(label: &str, profile: &'a ApplicantProfile) -> Option<&'a str> {
    let label = label.to_lowercase();
    let table: [(&str, &'a str); 8] = [
        ("phone", profile.phone.as_str()),
        ("mobile", profile.phone.as_str()),
        ("city", profile.location.as_str()),
        ("location", profile.location.as_str()),
        ("year", profile.years_experience.as_str()),
        ("experience", profile.years_experience.as_str()),
        ("salary", profile.salary_expected.as_str()),
        ("expected", profile.salary_expected.as_str()),
    ];
    table
        .into_iter()
        .find(|(keyword, value)| !value.is_empty() && label.contains(*keyword))
        .map(|(_, value)| value)
}

/// Answer for a yes/no question, by keyword containment; "Yes" otherwise.
pub fn yes_no_answer<'a>(question: &str, profile: &'a ApplicantProfile) -> &'a str {
    let question = question.to_lowercase();
    let table: [(&str, &'a str); 5] = [
        ("authorized", profile.work_auth.as_str()),
        ("sponsorship", profile.requires_sponsor.as_str()),
        ("visa", profile.requires_sponsor.as_str()),
        ("relocate", "Yes"),
        ("remote", "Yes"),
    ];
    table
        .into_iter()
        .find(|(keyword, _)| question.contains(*keyword))
        .map(|(_, answer)| answer)
        .filter(|answer| !answer.is_empty())
        .unwrap_or("Yes")
}

pub async fn fill_step<P: Page>(
    page: &P,
    profile: &ApplicantProfile,
    resume_path: &str,
    upload_settle: Duration,
) -> FillReport {
    let mut report = FillReport::default();

    match upload_resume(page, resume_path).await {
        Ok(true) => {
            info!("Uploaded resume");
            report.resume_uploaded = true;
            tokio::time::sleep(upload_settle).await;
        }
        Ok(false) => {}
        Err(e) => debug!("Resume upload skipped: {e}"),
    }

    if !profile.phone.is_empty() {
        if let Some(input) = phone_inputs().first_match(page).await {
            match type_into(&input, profile.phone.as_str()).await {
                Ok(()) => report.phone_filled = true,
                Err(e) => debug!("Phone field skipped: {e}"),
            }
        }
    }

    match fill_labelled_inputs(page, profile).await {
        Ok(n) => report.labelled_inputs = n,
        Err(e) => debug!("Label scan skipped: {e}"),
    }

    match answer_fieldsets(page, profile).await {
        Ok(n) => report.choices = n,
        Err(e) => debug!("Fieldset scan skipped: {e}"),
    }

    debug!("Fill pass: {report:?}");
    report
}

// File inputs are usually hidden behind a styled button, so no visibility check.
async fn upload_resume<P: Page>(page: &P, resume_path: &str) -> Result<bool, BrowserError> {
    let inputs = page.find_all(&Locator::xpath(FILE_INPUT_XPATH)).await?;
    match inputs.first() {
        Some(input) => {
            input.send_keys(resume_path).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

async fn type_into<E: Element>(input: &E, value: &str) -> Result<(), BrowserError> {
    input.clear().await?;
    input.send_keys(value).await
}

async fn fill_labelled_inputs<P: Page>(
    page: &P,
    profile: &ApplicantProfile,
) -> Result<usize, BrowserError> {
    let mut filled = 0;
    for label in page.find_all(&Locator::tag("label")).await? {
        let Ok(text) = label.text().await else { continue };
        let Some(value) = label_value(&text, profile) else { continue };
        let target = match label.attr("for").await {
            Ok(Some(id)) if !id.is_empty() => id,
            _ => continue,
        };
        match fill_by_id(page, &target, value).await {
            Ok(true) => filled += 1,
            Ok(false) => {}
            Err(e) => debug!("Input #{target} for '{}' skipped: {e}", text.trim()),
        }
    }
    Ok(filled)
}

async fn fill_by_id<P: Page>(page: &P, id: &str, value: &str) -> Result<bool, BrowserError> {
    let inputs = page.find_all(&Locator::id(id)).await?;
    let Some(input) = inputs.first() else {
        return Ok(false);
    };
    let kind = input.attr("type").await?.unwrap_or_default().to_lowercase();
    if SKIPPED_INPUT_TYPES.contains(&kind.as_str()) {
        return Ok(false);
    }
    type_into(input, value).await?;
    Ok(true)
}

async fn answer_fieldsets<P: Page>(
    page: &P,
    profile: &ApplicantProfile,
) -> Result<usize, BrowserError> {
    let mut answered = 0;
    for fieldset in page.find_all(&Locator::tag("fieldset")).await? {
        match answer_fieldset(&fieldset, profile).await {
            Ok(true) => answered += 1,
            Ok(false) => {}
            Err(e) => debug!("Fieldset skipped: {e}"),
        }
    }
    Ok(answered)
}

async fn answer_fieldset<E: Element>(
    fieldset: &E,
    profile: &ApplicantProfile,
) -> Result<bool, BrowserError> {
    let legends = fieldset.find_all(&Locator::tag("legend")).await?;
    let Some(legend) = legends.first() else {
        return Ok(false);
    };
    let question = legend.text().await?;
    let answer = yes_no_answer(&question, profile);
    let radios = fieldset.find_all(&Locator::xpath(radio_xpath(answer))).await?;
    let Some(radio) = radios.first() else {
        return Ok(false);
    };
    radio.click().await?;
    debug!("Answered '{}' with {answer}", question.trim());
    Ok(true)
}
