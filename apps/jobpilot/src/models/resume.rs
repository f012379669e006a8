use serde::{Deserialize, Serialize};

/// Structured résumé content returned by the model. Built once per tailoring
/// run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub keywords_added: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub dates: String,
}

impl TailoredResume {
    /// A usable résumé has a summary, at least one skill and one role.
    pub fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        if self.skills.iter().all(|s| s.trim().is_empty()) {
            return Err("skills list is empty".to_string());
        }
        if self.experience.is_empty() {
            return Err("experience list is empty".to_string());
        }
        Ok(())
    }
}
