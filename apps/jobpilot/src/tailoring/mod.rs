//! Résumé tailoring: rewrites the base résumé for one job description and
//! logs the application to the tracker.
//!
//! Flow: read résumé + job description → LLM tailor → validate →
//!       render DOCX in memory → write file → append tracker row.
//!
//! Nothing is written to disk until the model output has parsed and
//! validated, so a bad reply leaves neither a document nor a tracker row.

pub mod prompts;
pub mod source;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::info;

use crate::config::ContactDetails;
use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_RULES, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::{ApplicationRecord, Platform, Status, TailoredResume};
use crate::render::render_resume_docx;
use crate::tracker::schema::JOB_DESC_SNIPPET_CHARS;
use crate::tracker::Tracker;
use prompts::{TAILOR_PROMPT_TEMPLATE, TAILOR_ROLE};
use source::{read_job_desc, read_resume_text};

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("static regex"));
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(no_fabrication|title|company|job_desc|resume_text)\}").expect("static regex")
});

/// Inputs of one tailoring run.
#[derive(Debug, Clone)]
pub struct TailorRequest {
    pub resume_path: PathBuf,
    /// Path to a text file, or the job description itself.
    pub job_desc: String,
    pub company: String,
    pub title: String,
    pub platform: Platform,
    pub job_url: String,
    pub location: String,
    pub salary: String,
    pub candidate_name: String,
    pub out_dir: PathBuf,
    pub tracker_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TailorOutcome {
    pub resume_path: PathBuf,
    pub tracker_row: u32,
    pub keywords_added: Vec<String>,
}

/// `Resume_{company}_{title}_{YYYYMMDD}.docx`, with every non-word character
/// of company and title replaced by `_`.
pub fn resume_filename(company: &str, title: &str, date: NaiveDate) -> String {
    format!(
        "Resume_{}_{}_{}.docx",
        NON_WORD.replace_all(company, "_"),
        NON_WORD.replace_all(title, "_"),
        date.format("%Y%m%d")
    )
}

/// Runs the full tailoring pipeline for one job.
pub async fn tailor_application(
    llm: &LlmClient,
    contact: &ContactDetails,
    request: &TailorRequest,
    today: NaiveDate,
) -> Result<TailorOutcome, AppError> {
    if request.company.trim().is_empty() || request.title.trim().is_empty() {
        return Err(AppError::Validation(
            "company and title are required".to_string(),
        ));
    }

    let resume_text = read_resume_text(&request.resume_path)?;
    let job_desc = read_job_desc(&request.job_desc)?;

    info!(
        "Tailoring resume for {} at {} (model: {})",
        request.title,
        request.company,
        llm.model()
    );
    let tailored = request_tailored_resume(llm, &resume_text, &job_desc, request).await?;

    let bytes = render_resume_docx(&tailored, &request.candidate_name, contact)?;
    // An unreadable tracker must fail the run before the document exists
    let mut tracker = Tracker::open_or_create(&request.tracker_path, &[])?;

    std::fs::create_dir_all(&request.out_dir)?;
    let filename = resume_filename(&request.company, &request.title, today);
    let resume_path = request.out_dir.join(&filename);
    std::fs::write(&resume_path, bytes)?;
    info!("Tailored resume saved: {}", resume_path.display());

    let record = ApplicationRecord {
        date: today.format("%Y-%m-%d").to_string(),
        company: request.company.clone(),
        title: request.title.clone(),
        platform: request.platform.label().to_string(),
        location: request.location.clone(),
        salary: request.salary.clone(),
        status: Some(Status::Applied),
        resume_version: filename,
        resume_link: absolute(&resume_path).display().to_string(),
        job_url: request.job_url.clone(),
        job_desc_snippet: job_desc.chars().take(JOB_DESC_SNIPPET_CHARS).collect(),
        notes: format!("Keywords added: {}", tailored.keywords_added.join(", ")),
        ..Default::default()
    };

    let tracker_row = tracker.append(&record)?;
    tracker.save()?;
    info!(
        "Logged to tracker {}: row {}",
        tracker.path().display(),
        tracker_row
    );

    Ok(TailorOutcome {
        resume_path,
        tracker_row,
        keywords_added: tailored.keywords_added,
    })
}

async fn request_tailored_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_desc: &str,
    request: &TailorRequest,
) -> Result<TailoredResume, AppError> {
    let prompt = build_prompt(resume_text, job_desc, request);
    let system = format!("{TAILOR_ROLE} {JSON_ONLY_RULES}");
    let tailored: TailoredResume = llm
        .call_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("Tailoring LLM call failed: {e}")))?;

    tailored
        .validate()
        .map_err(|reason| AppError::Llm(format!("Model returned an unusable resume: {reason}")))?;

    Ok(tailored)
}

/// Fills the template in one pass, so placeholder-looking text inside the
/// job description or résumé is left as written.
fn build_prompt(resume_text: &str, job_desc: &str, request: &TailorRequest) -> String {
    PLACEHOLDER
        .replace_all(TAILOR_PROMPT_TEMPLATE, |caps: &Captures<'_>| match &caps[1] {
            "no_fabrication" => NO_FABRICATION_INSTRUCTION.to_string(),
            "title" => request.title.clone(),
            "company" => request.company.clone(),
            "job_desc" => job_desc.to_string(),
            "resume_text" => resume_text.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
