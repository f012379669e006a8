use thiserror::Error;

use crate::browser::BrowserError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Every command returns `Result<T, AppError>`; `main` turns it into an exit code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing credentials or API key. Raised before any side effect.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Tracker error: {0}")]
    Tracker(String),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// A pipeline step (child process) exited unsuccessfully.
    #[error("{step} failed (exit {code})")]
    Step { step: String, code: i32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Validation(_) => 64,
            AppError::Step { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Llm(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_2() {
        let err = AppError::Config("GROQ_API_KEY is not set".to_string());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_step_error_propagates_child_exit_code() {
        let err = AppError::Step {
            step: "Tailoring resume".to_string(),
            code: 3,
        };
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "Tailoring resume failed (exit 3)");
    }

    #[test]
    fn test_step_error_killed_by_signal_maps_to_1() {
        let err = AppError::Step {
            step: "Auto-apply".to_string(),
            code: -1,
        };
        assert_eq!(err.exit_code(), 1);
    }
}
