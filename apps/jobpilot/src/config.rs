use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::apply::ApplyTimings;
use crate::errors::AppError;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Application configuration: a flat JSON file with environment overrides.
/// Loaded once per run and passed explicitly to every component.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub model: String,
    pub llm_base_url: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub location: String,
    pub years_experience: String,
    pub salary_expected: String,
    pub work_auth: String,
    pub requires_sponsor: String,
    pub linkedin_email: Option<String>,
    pub linkedin_password: Option<String>,
    pub webdriver_url: String,
    pub log_level: String,
    pub apply: ApplyTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            full_name: "Your Name".to_string(),
            email: String::new(),
            phone: String::new(),
            linkedin_url: String::new(),
            location: String::new(),
            years_experience: String::new(),
            salary_expected: String::new(),
            work_auth: "Yes".to_string(),
            requires_sponsor: "No".to_string(),
            linkedin_email: None,
            linkedin_password: None,
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            log_level: "info".to_string(),
            apply: ApplyTuning::default(),
        }
    }
}

/// Tuning values for the apply heuristic. None of these have a principled
/// value; they are exposed so a slow portal can be given more room.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApplyTuning {
    pub step_bound: u32,
    pub modal_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub page_settle_secs: u64,
    pub step_settle_secs: u64,
    pub upload_settle_secs: u64,
    pub advance_settle_secs: u64,
    pub submit_settle_secs: u64,
    pub manual_pause_secs: u64,
    pub close_delay_secs: u64,
}

impl Default for ApplyTuning {
    fn default() -> Self {
        Self {
            step_bound: 10,
            modal_timeout_secs: 60,
            poll_interval_ms: 1000,
            page_settle_secs: 6,
            step_settle_secs: 2,
            upload_settle_secs: 2,
            advance_settle_secs: 2,
            submit_settle_secs: 3,
            manual_pause_secs: 10,
            close_delay_secs: 5,
        }
    }
}

impl ApplyTuning {
    pub fn timings(&self) -> ApplyTimings {
        ApplyTimings {
            step_bound: self.step_bound.max(1),
            modal_timeout: Duration::from_secs(self.modal_timeout_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            page_settle: Duration::from_secs(self.page_settle_secs),
            step_settle: Duration::from_secs(self.step_settle_secs),
            upload_settle: Duration::from_secs(self.upload_settle_secs),
            advance_settle: Duration::from_secs(self.advance_settle_secs),
            submit_settle: Duration::from_secs(self.submit_settle_secs),
            manual_pause: Duration::from_secs(self.manual_pause_secs),
            close_delay: Duration::from_secs(self.close_delay_secs),
        }
    }
}

/// Values the form filler may type into an application form.
#[derive(Debug, Clone, Default)]
pub struct ApplicantProfile {
    pub phone: String,
    pub location: String,
    pub years_experience: String,
    pub salary_expected: String,
    pub work_auth: String,
    pub requires_sponsor: String,
}

/// Contact line printed under the candidate's name on the tailored résumé.
#[derive(Debug, Clone, Default)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
}

impl Config {
    /// Loads `.env`, then the JSON file at `path` (defaults when the file is
    /// absent), then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Cannot read config {}: {e}", path.display()))
            })?;
            Self::from_json(&raw)
                .map_err(|e| AppError::Config(format!("Invalid config {}: {e}", path.display())))?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.groq_api_key = Some(key);
        }
        if let Some(url) = lookup("WEBDRIVER_URL").filter(|u| !u.trim().is_empty()) {
            self.webdriver_url = url;
        }
        if let Some(level) = lookup("RUST_LOG").filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
    }

    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.groq_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "Set GROQ_API_KEY environment variable or add groq_api_key to config.json"
                        .to_string(),
                )
            })
    }

    pub fn linkedin_credentials(&self) -> Result<(&str, &str), AppError> {
        let email = self.linkedin_email.as_deref().filter(|v| !v.is_empty());
        let password = self.linkedin_password.as_deref().filter(|v| !v.is_empty());
        match (email, password) {
            (Some(e), Some(p)) => Ok((e, p)),
            _ => Err(AppError::Config(
                "linkedin_email and linkedin_password must be set in config.json".to_string(),
            )),
        }
    }

    pub fn profile(&self) -> ApplicantProfile {
        ApplicantProfile {
            phone: self.phone.clone(),
            location: self.location.clone(),
            years_experience: self.years_experience.clone(),
            salary_expected: self.salary_expected.clone(),
            work_auth: self.work_auth.clone(),
            requires_sponsor: self.requires_sponsor.clone(),
        }
    }

    pub fn contact(&self) -> ContactDetails {
        ContactDetails {
            email: self.email.clone(),
            phone: self.phone.clone(),
            linkedin_url: self.linkedin_url.clone(),
        }
    }
}
