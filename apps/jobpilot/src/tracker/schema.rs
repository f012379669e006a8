//! Fixed layout of the tracker workbook.

pub const APPLICATIONS_SHEET: &str = "Applications";
pub const DASHBOARD_SHEET: &str = "Dashboard";
pub const CONFIG_SHEET: &str = "Config";

pub const HEADER_ROW: u32 = 1;
pub const FIRST_DATA_ROW: u32 = 2;

/// Applications sheet headers, in column order (column A = 1).
pub const COLUMNS: [&str; 19] = [
    "#",
    "Date Applied",
    "Company",
    "Job Title",
    "Platform",
    "Location",
    "Salary Range",
    "Status",
    "Resume Version",
    "Resume Link",
    "Job URL",
    "Job Description",
    "Cover Letter",
    "Contact Name",
    "Contact Email",
    "Follow-Up Date",
    "Interview Date",
    "Offer Amount",
    "Notes",
];

pub const COL_INDEX: u32 = 1;
pub const COL_DATE: u32 = 2;
/// Identity column: a row is free while this cell is empty.
pub const COL_COMPANY: u32 = 3;
pub const COL_TITLE: u32 = 4;
pub const COL_PLATFORM: u32 = 5;
pub const COL_LOCATION: u32 = 6;
pub const COL_SALARY: u32 = 7;
pub const COL_STATUS: u32 = 8;
pub const COL_RESUME_VERSION: u32 = 9;
pub const COL_RESUME_LINK: u32 = 10;
pub const COL_JOB_URL: u32 = 11;
pub const COL_JOB_DESC: u32 = 12;
pub const COL_COVER_LETTER: u32 = 13;
pub const COL_CONTACT_NAME: u32 = 14;
pub const COL_CONTACT_EMAIL: u32 = 15;
pub const COL_FOLLOW_UP: u32 = 16;
pub const COL_INTERVIEW: u32 = 17;
pub const COL_OFFER: u32 = 18;
pub const COL_NOTES: u32 = 19;

/// Job-description text stored in the tracker is cut to this many characters.
pub const JOB_DESC_SNIPPET_CHARS: usize = 500;

/// Platform labels broken out on the dashboard.
pub const DASHBOARD_PLATFORMS: [&str; 7] = [
    "LinkedIn",
    "Indeed",
    "Glassdoor",
    "Company Site",
    "Referral",
    "Recruiter",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_constants_line_up_with_headers() {
        assert_eq!(COLUMNS[(COL_COMPANY - 1) as usize], "Company");
        assert_eq!(COLUMNS[(COL_STATUS - 1) as usize], "Status");
        assert_eq!(COLUMNS[(COL_JOB_URL - 1) as usize], "Job URL");
        assert_eq!(COLUMNS[(COL_NOTES - 1) as usize], "Notes");
        assert_eq!(COLUMNS.len() as u32, COL_NOTES);
    }
}
