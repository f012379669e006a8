//! DOCX rendering of a tailored résumé.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run};

use crate::config::ContactDetails;
use crate::errors::AppError;
use crate::models::TailoredResume;

const HEADING_COLOR: &str = "1F3864";
const ACCENT_COLOR: &str = "2E75B6";
const MUTED_COLOR: &str = "646464";
const SKILLS_PER_LINE: usize = 3;

// docx-rs sizes are half-points
const NAME_SIZE: usize = 44;
const HEADING_SIZE: usize = 22;
const BODY_SIZE: usize = 20;
const SMALL_SIZE: usize = 18;

/// Renders the résumé into DOCX bytes. Nothing touches the filesystem here,
/// so a failed render never leaves a partial file.
pub fn render_resume_docx(
    resume: &TailoredResume,
    candidate_name: &str,
    contact: &ContactDetails,
) -> Result<Vec<u8>, AppError> {
    let mut doc = Docx::new().add_paragraph(
        Paragraph::new().align(AlignmentType::Center).add_run(
            Run::new()
                .add_text(candidate_name)
                .bold()
                .size(NAME_SIZE)
                .color(HEADING_COLOR),
        ),
    );

    let contact_line = contact_line(contact);
    if !contact_line.is_empty() {
        doc = doc.add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                Run::new()
                    .add_text(contact_line)
                    .size(BODY_SIZE)
                    .color(MUTED_COLOR),
            ),
        );
    }

    doc = doc
        .add_paragraph(heading("PROFESSIONAL SUMMARY"))
        .add_paragraph(body(&resume.summary));

    doc = doc.add_paragraph(heading("CORE COMPETENCIES"));
    for line in skill_lines(&resume.skills) {
        doc = doc.add_paragraph(body(&line));
    }

    doc = doc.add_paragraph(heading("PROFESSIONAL EXPERIENCE"));
    for exp in &resume.experience {
        doc = doc
            .add_paragraph(
                Paragraph::new()
                    .add_run(
                        Run::new()
                            .add_text(format!("{}  |  ", exp.title))
                            .bold()
                            .size(HEADING_SIZE),
                    )
                    .add_run(
                        Run::new()
                            .add_text(exp.company.as_str())
                            .bold()
                            .size(HEADING_SIZE)
                            .color(ACCENT_COLOR),
                    ),
            )
            .add_paragraph(small_italic(&exp.dates));
        for bullet in &exp.bullets {
            doc = doc.add_paragraph(body(&format!("•  {bullet}")));
        }
    }

    if !resume.education.is_empty() {
        doc = doc.add_paragraph(heading("EDUCATION"));
        for edu in &resume.education {
            doc = doc
                .add_paragraph(
                    Paragraph::new()
                        .add_run(
                            Run::new()
                                .add_text(format!("{}  |  ", edu.degree))
                                .bold()
                                .size(BODY_SIZE),
                        )
                        .add_run(
                            Run::new()
                                .add_text(edu.school.as_str())
                                .size(BODY_SIZE)
                                .color(ACCENT_COLOR),
                        ),
                )
                .add_paragraph(small_italic(&edu.dates));
        }
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buf)
        .map_err(|e| AppError::Document(format!("Failed to build DOCX: {e}")))?;
    Ok(buf.into_inner())
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(
        Run::new()
            .add_text(text)
            .bold()
            .size(HEADING_SIZE)
            .color(HEADING_COLOR),
    )
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE))
}

fn small_italic(text: &str) -> Paragraph {
    Paragraph::new().add_run(
        Run::new()
            .add_text(text)
            .italic()
            .size(SMALL_SIZE)
            .color(MUTED_COLOR),
    )
}

fn contact_line(contact: &ContactDetails) -> String {
    [&contact.email, &contact.phone, &contact.linkedin_url]
        .into_iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("  |  ")
}

fn skill_lines(skills: &[String]) -> Vec<String> {
    skills
        .chunks(SKILLS_PER_LINE)
        .map(|row| row.join("    •  "))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_lines_groups_by_three() {
        let skills: Vec<String> = ["Rust", "Go", "SQL", "Kafka"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            skill_lines(&skills),
            vec!["Rust    •  Go    •  SQL".to_string(), "Kafka".to_string()]
        );
    }

    #[test]
    fn test_contact_line_skips_blank_fields() {
        let contact = ContactDetails {
            email: "ada@example.com".to_string(),
            phone: " ".to_string(),
            linkedin_url: "linkedin.com/in/ada".to_string(),
        };
        assert_eq!(contact_line(&contact), "ada@example.com  |  linkedin.com/in/ada");
    }

    #[test]
    fn test_render_produces_zip_container() {
        let resume: TailoredResume = serde_json::from_value(serde_json::json!({
            "summary": "Engineer.",
            "skills": ["Rust"],
            "experience": [{"company": "Globex", "title": "Dev", "dates": "2021", "bullets": ["Shipped"]}]
        }))
        .unwrap();
        let bytes = render_resume_docx(&resume, "Ada", &ContactDetails::default()).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
