// Prompt constants for résumé tailoring.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role line of the tailoring system prompt; `JSON_ONLY_RULES` follows it.
pub const TAILOR_ROLE: &str = "You are an expert resume writer and ATS optimization specialist.";

/// Tailoring prompt template.
/// Replace: {no_fabrication}, {title}, {company}, {job_desc}, {resume_text}
pub const TAILOR_PROMPT_TEMPLATE: &str = r#"Tailor the resume below to match the job description.

{no_fabrication}

JOB: {title} at {company}

JOB DESCRIPTION:
{job_desc}

CURRENT RESUME:
{resume_text}

Return this exact JSON structure:
{
  "summary": "2-3 sentence tailored professional summary",
  "skills": ["skill1", "skill2"],
  "experience": [
    {
      "company": "Company Name",
      "title": "Job Title",
      "dates": "Month Year - Month Year",
      "bullets": [
        "Achievement bullet tailored to job keywords"
      ]
    }
  ],
  "education": [
    {
      "school": "University Name",
      "degree": "Degree, Major",
      "dates": "Year"
    }
  ],
  "keywords_added": ["list", "of", "keywords", "injected"]
}

Rules:
- Reorder and rephrase bullet points to match job keywords
- Prioritize achievements with metrics (numbers, %)
- Inject keywords from the job description naturally
- Skills section should list the 12-15 most relevant skills"#;
