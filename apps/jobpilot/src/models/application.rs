use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an application as stored in the tracker's Status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    ToApply,
    Applied,
    PhoneScreen,
    Interview,
    TechnicalTest,
    FinalRound,
    Offer,
    Rejected,
    Withdrawn,
    Error,
    ManualReviewNeeded,
}

impl Status {
    pub const ALL: [Status; 11] = [
        Status::ToApply,
        Status::Applied,
        Status::PhoneScreen,
        Status::Interview,
        Status::TechnicalTest,
        Status::FinalRound,
        Status::Offer,
        Status::Rejected,
        Status::Withdrawn,
        Status::Error,
        Status::ManualReviewNeeded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToApply => "To Apply",
            Status::Applied => "Applied",
            Status::PhoneScreen => "Phone Screen",
            Status::Interview => "Interview",
            Status::TechnicalTest => "Technical Test",
            Status::FinalRound => "Final Round",
            Status::Offer => "Offer",
            Status::Rejected => "Rejected",
            Status::Withdrawn => "Withdrawn",
            Status::Error => "Error",
            Status::ManualReviewNeeded => "Manual Review Needed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Status::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown status '{wanted}'"))
    }
}

/// Job board the posting lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum Platform {
    #[value(name = "linkedin")]
    LinkedIn,
    Indeed,
    Glassdoor,
    #[default]
    Generic,
}

impl Platform {
    /// Label written to the tracker's Platform column.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Indeed => "Indeed",
            Platform::Glassdoor => "Glassdoor",
            Platform::Generic => "Company Site",
        }
    }

    /// Value accepted on the command line.
    pub fn cli_value(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Indeed => "indeed",
            Platform::Glassdoor => "glassdoor",
            Platform::Generic => "generic",
        }
    }
}

/// One row of the Applications sheet. Identity is the row position; there is
/// no uniqueness constraint on any field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub date: String,
    pub company: String,
    pub title: String,
    pub platform: String,
    pub location: String,
    pub salary: String,
    pub status: Option<Status>,
    pub resume_version: String,
    pub resume_link: String,
    pub job_url: String,
    pub job_desc_snippet: String,
    pub cover_letter: String,
    pub contact_name: String,
    pub contact_email: String,
    pub follow_up_date: String,
    pub interview_date: String,
    pub offer_amount: String,
    pub notes: String,
}
