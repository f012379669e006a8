use std::path::PathBuf;

use chrono::Local;
use clap::Args;

use super::{DEFAULT_BASE_RESUME, DEFAULT_RESUMES_DIR, DEFAULT_TRACKER};
use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::Platform;
use crate::tailoring::{tailor_application, TailorRequest};

#[derive(Debug, Args)]
pub struct TailorArgs {
    /// Base résumé (.docx, .pdf or plain text)
    #[arg(long, default_value = DEFAULT_BASE_RESUME)]
    pub resume: PathBuf,

    /// Path to a job description file, or the description itself
    #[arg(long)]
    pub job_desc: String,

    #[arg(long)]
    pub company: String,

    #[arg(long)]
    pub title: String,

    #[arg(long, value_enum, default_value_t = Platform::Generic)]
    pub platform: Platform,

    #[arg(long, default_value = "")]
    pub url: String,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long, default_value = "")]
    pub salary: String,

    #[arg(long, default_value = DEFAULT_TRACKER)]
    pub tracker: PathBuf,

    #[arg(long, default_value = DEFAULT_RESUMES_DIR)]
    pub out_dir: PathBuf,

    /// Candidate name printed on the résumé (defaults to full_name from config)
    #[arg(long)]
    pub name: Option<String>,
}

pub async fn run(config: &Config, args: TailorArgs) -> Result<(), AppError> {
    let api_key = config.require_api_key()?;
    let llm = LlmClient::new(api_key, &config.llm_base_url, &config.model)?;

    let request = TailorRequest {
        resume_path: args.resume,
        job_desc: args.job_desc,
        company: args.company,
        title: args.title,
        platform: args.platform,
        job_url: args.url,
        location: args.location,
        salary: args.salary,
        candidate_name: args.name.unwrap_or_else(|| config.full_name.clone()),
        out_dir: args.out_dir,
        tracker_path: args.tracker,
    };

    let outcome =
        tailor_application(&llm, &config.contact(), &request, Local::now().date_naive()).await?;

    println!("Tailored resume: {}", outcome.resume_path.display());
    println!("Tracker row:     {}", outcome.tracker_row);
    if !outcome.keywords_added.is_empty() {
        println!("Keywords added:  {}", outcome.keywords_added.join(", "));
    }
    Ok(())
}
