//! Reading the inputs of a tailoring run: the base résumé and the job description.

use std::path::Path;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::errors::AppError;

/// Extracts plain text from the base résumé. `.docx` and `.pdf` are parsed,
/// anything else is read as UTF-8 text.
pub fn read_resume_text(path: &Path) -> Result<String, AppError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match ext.as_str() {
        "docx" => {
            let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
            docx_text(&bytes)
                .map_err(|e| AppError::Document(format!("{}: {e}", path.display())))?
        }
        "pdf" => pdf_extract::extract_text(path)
            .map_err(|e| AppError::Document(format!("{}: {e}", path.display())))?,
        _ => std::fs::read_to_string(path).map_err(|e| read_error(path, e))?,
    };

    let text = non_blank_lines(&text);
    if text.is_empty() {
        return Err(AppError::Document(format!(
            "{} contains no readable text",
            path.display()
        )));
    }
    Ok(text)
}

/// Paragraph text of a DOCX document, one paragraph per line.
pub fn docx_text(bytes: &[u8]) -> Result<String, String> {
    let docx = read_docx(bytes).map_err(|e| format!("DOCX parsing failed: {e}"))?;
    let mut text = String::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            for para_child in &p.children {
                if let ParagraphChild::Run(run) = para_child {
                    for run_child in &run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

/// A job description is either a path to a text file or the text itself.
pub fn read_job_desc(input: &str) -> Result<String, AppError> {
    let path = Path::new(input);
    let text = if path.is_file() {
        std::fs::read_to_string(path).map_err(|e| read_error(path, e))?
    } else {
        input.to_string()
    };
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "job description cannot be empty".to_string(),
        ));
    }
    Ok(text)
}

fn non_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::Document(format!("Cannot read {}: {e}", path.display()))
}
