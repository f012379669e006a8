use crate::models::Status;

/// Result of one stage of the flow that may need a human to finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    NeedsManualStep,
    Failed(String),
}

/// Terminal result of an apply attempt, as written to the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    ManualReviewNeeded(String),
    Error(String),
}

impl ApplyOutcome {
    pub fn status(&self) -> Status {
        match self {
            ApplyOutcome::Applied => Status::Applied,
            ApplyOutcome::ManualReviewNeeded(_) => Status::ManualReviewNeeded,
            ApplyOutcome::Error(_) => Status::Error,
        }
    }

    /// Text appended to the tracker's Notes cell.
    pub fn notes(&self) -> &str {
        match self {
            ApplyOutcome::Applied => "",
            ApplyOutcome::ManualReviewNeeded(reason) => reason,
            ApplyOutcome::Error(message) => message,
        }
    }
}

impl From<StepOutcome> for ApplyOutcome {
    fn from(step: StepOutcome) -> Self {
        match step {
            StepOutcome::Succeeded => ApplyOutcome::Applied,
            StepOutcome::NeedsManualStep => {
                ApplyOutcome::ManualReviewNeeded("form not completed automatically".to_string())
            }
            StepOutcome::Failed(reason) => ApplyOutcome::ManualReviewNeeded(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_outcomes_never_become_errors() {
        assert_eq!(ApplyOutcome::from(StepOutcome::Succeeded), ApplyOutcome::Applied);
        assert_eq!(
            ApplyOutcome::from(StepOutcome::Failed("application form not detected".into()))
                .status(),
            Status::ManualReviewNeeded
        );
        assert_eq!(
            ApplyOutcome::from(StepOutcome::NeedsManualStep).status(),
            Status::ManualReviewNeeded
        );
    }

    #[test]
    fn test_error_carries_message_into_notes() {
        let outcome = ApplyOutcome::Error("session deleted".to_string());
        assert_eq!(outcome.status(), Status::Error);
        assert_eq!(outcome.notes(), "session deleted");
        assert_eq!(ApplyOutcome::Applied.notes(), "");
    }
}
