//! Tracker: the spreadsheet of every application and its status.
//!
//! The workbook is read, mutated and written back wholesale within one
//! process. There is no locking: two concurrent runs against the same file
//! can lose each other's writes. `save` at least guarantees a crash never
//! leaves a truncated file behind.

pub mod schema;
pub mod workbook;

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::errors::AppError;
use crate::models::{ApplicationRecord, Status};
use schema::*;

pub struct Tracker {
    path: PathBuf,
    book: Spreadsheet,
}

/// Per-status counts over every populated row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerSummary {
    pub total: usize,
    pub by_status: Vec<(Status, usize)>,
    /// Rows with an empty or unrecognised status.
    pub unclassified: usize,
}

impl Tracker {
    /// Creates a new workbook at `path` and writes it to disk.
    pub fn create(path: &Path, settings: &[(&str, String)]) -> Result<Self, AppError> {
        let tracker = Self {
            path: path.to_path_buf(),
            book: workbook::new_workbook(settings)?,
        };
        tracker.save()?;
        info!("Tracker created: {}", path.display());
        Ok(tracker)
    }

    pub fn open(path: &Path) -> Result<Self, AppError> {
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
            AppError::Tracker(format!("Cannot open tracker {}: {e}", path.display()))
        })?;
        let tracker = Self {
            path: path.to_path_buf(),
            book,
        };
        tracker.applications()?;
        Ok(tracker)
    }

    pub fn open_or_create(path: &Path, settings: &[(&str, String)]) -> Result<Self, AppError> {
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path, settings)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn applications(&self) -> Result<&Worksheet, AppError> {
        self.book
            .get_sheet_by_name(APPLICATIONS_SHEET)
            .ok_or_else(|| self.missing_sheet())
    }

    fn applications_mut(&mut self) -> Result<&mut Worksheet, AppError> {
        let err = self.missing_sheet();
        self.book
            .get_sheet_by_name_mut(APPLICATIONS_SHEET)
            .ok_or(err)
    }

    fn missing_sheet(&self) -> AppError {
        AppError::Tracker(format!(
            "{} has no '{APPLICATIONS_SHEET}' sheet",
            self.path.display()
        ))
    }

    /// Writes `record` into the first row whose Company cell is empty and
    /// returns that row number. Populated rows are never touched.
    pub fn append(&mut self, record: &ApplicationRecord) -> Result<u32, AppError> {
        let sheet = self.applications_mut()?;
        let row = first_free_row(sheet);
        write_record(sheet, row, record);
        Ok(row)
    }

    /// Sets the status of the first row whose Job URL contains `job_url` and
    /// appends `notes` to its Notes cell. Returns the row, or `None` when no
    /// row matches (nothing is written).
    pub fn update_status_by_url(
        &mut self,
        job_url: &str,
        status: Status,
        notes: &str,
    ) -> Result<Option<u32>, AppError> {
        let needle = job_url.trim();
        if needle.is_empty() {
            return Ok(None);
        }
        let sheet = self.applications_mut()?;
        let last = sheet.get_highest_row();
        let Some(row) = (FIRST_DATA_ROW..=last).find(|&row| {
            let stored = cell_text(sheet, COL_JOB_URL, row);
            !stored.is_empty() && stored.contains(needle)
        }) else {
            return Ok(None);
        };

        sheet
            .get_cell_mut((COL_STATUS, row))
            .set_value(status.as_str());
        if !notes.trim().is_empty() {
            let existing = cell_text(sheet, COL_NOTES, row);
            sheet
                .get_cell_mut((COL_NOTES, row))
                .set_value(format!("{existing} | {notes}"));
        }
        Ok(Some(row))
    }

    /// Every populated row, with its row number.
    pub fn records(&self) -> Result<Vec<(u32, ApplicationRecord)>, AppError> {
        let sheet = self.applications()?;
        let last = sheet.get_highest_row();
        Ok((FIRST_DATA_ROW..=last)
            .filter(|&row| !cell_text(sheet, COL_COMPANY, row).trim().is_empty())
            .map(|row| (row, read_record(sheet, row)))
            .collect())
    }

    pub fn summary(&self) -> Result<TrackerSummary, AppError> {
        let records = self.records()?;
        let mut summary = TrackerSummary {
            total: records.len(),
            by_status: Status::ALL.iter().map(|s| (*s, 0)).collect(),
            unclassified: 0,
        };
        for (_, record) in &records {
            match record.status {
                Some(status) => {
                    if let Some(entry) = summary.by_status.iter_mut().find(|(s, _)| *s == status) {
                        entry.1 += 1;
                    }
                }
                None => summary.unclassified += 1,
            }
        }
        Ok(summary)
    }

    /// Writes the workbook to a sibling temp file, then renames it over the
    /// tracker path.
    pub fn save(&self) -> Result<(), AppError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let tmp = tempfile::Builder::new()
            .prefix(".tracker-")
            .suffix(".xlsx")
            .tempfile_in(dir)?;
        umya_spreadsheet::writer::xlsx::write(&self.book, tmp.path()).map_err(|e| {
            AppError::Tracker(format!("Cannot write tracker {}: {e}", self.path.display()))
        })?;
        tmp.persist(&self.path).map_err(|e| {
            AppError::Tracker(format!(
                "Cannot replace tracker {}: {}",
                self.path.display(),
                e.error
            ))
        })?;
        Ok(())
    }
}

/// Opens the tracker, records an apply outcome against the row matching
/// `job_url`, and saves. Failures are logged, never returned: the outcome of
/// an apply attempt must not turn into a crash after the fact.
pub fn record_outcome(path: &Path, job_url: &str, status: Status, notes: &str) -> Option<u32> {
    let result = Tracker::open(path).and_then(|mut tracker| {
        let row = tracker.update_status_by_url(job_url, status, notes)?;
        if row.is_some() {
            tracker.save()?;
        }
        Ok(row)
    });
    match result {
        Ok(Some(row)) => {
            info!("Tracker updated: row {row} → {status}");
            Some(row)
        }
        Ok(None) => {
            warn!("URL not found in tracker: {job_url}");
            None
        }
        Err(e) => {
            warn!("Tracker error: {e}");
            None
        }
    }
}

fn first_free_row(sheet: &Worksheet) -> u32 {
    let mut row = FIRST_DATA_ROW;
    while !cell_text(sheet, COL_COMPANY, row).trim().is_empty() {
        row += 1;
    }
    row
}

fn cell_text(sheet: &Worksheet, col: u32, row: u32) -> String {
    sheet
        .get_cell((col, row))
        .map(|c| c.get_value().to_string())
        .unwrap_or_default()
}

fn write_record(sheet: &mut Worksheet, row: u32, record: &ApplicationRecord) {
    sheet
        .get_cell_mut((COL_INDEX, row))
        .set_value_number(f64::from(row - 1));
    let status = record.status.map(|s| s.as_str()).unwrap_or_default();
    let fields: [(u32, &str); 18] = [
        (COL_DATE, record.date.as_str()),
        (COL_COMPANY, record.company.as_str()),
        (COL_TITLE, record.title.as_str()),
        (COL_PLATFORM, record.platform.as_str()),
        (COL_LOCATION, record.location.as_str()),
        (COL_SALARY, record.salary.as_str()),
        (COL_STATUS, status),
        (COL_RESUME_VERSION, record.resume_version.as_str()),
        (COL_RESUME_LINK, record.resume_link.as_str()),
        (COL_JOB_URL, record.job_url.as_str()),
        (COL_JOB_DESC, record.job_desc_snippet.as_str()),
        (COL_COVER_LETTER, record.cover_letter.as_str()),
        (COL_CONTACT_NAME, record.contact_name.as_str()),
        (COL_CONTACT_EMAIL, record.contact_email.as_str()),
        (COL_FOLLOW_UP, record.follow_up_date.as_str()),
        (COL_INTERVIEW, record.interview_date.as_str()),
        (COL_OFFER, record.offer_amount.as_str()),
        (COL_NOTES, record.notes.as_str()),
    ];
    for (col, value) in fields {
        sheet.get_cell_mut((col, row)).set_value(value);
    }
}

fn read_record(sheet: &Worksheet, row: u32) -> ApplicationRecord {
    let text = |col| cell_text(sheet, col, row);
    ApplicationRecord {
        date: text(COL_DATE),
        company: text(COL_COMPANY),
        title: text(COL_TITLE),
        platform: text(COL_PLATFORM),
        location: text(COL_LOCATION),
        salary: text(COL_SALARY),
        status: text(COL_STATUS).parse().ok(),
        resume_version: text(COL_RESUME_VERSION),
        resume_link: text(COL_RESUME_LINK),
        job_url: text(COL_JOB_URL),
        job_desc_snippet: text(COL_JOB_DESC),
        cover_letter: text(COL_COVER_LETTER),
        contact_name: text(COL_CONTACT_NAME),
        contact_email: text(COL_CONTACT_EMAIL),
        follow_up_date: text(COL_FOLLOW_UP),
        interview_date: text(COL_INTERVIEW),
        offer_amount: text(COL_OFFER),
        notes: text(COL_NOTES),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn record(company: &str, url: &str) -> ApplicationRecord {
        ApplicationRecord {
            date: "2024-05-01".to_string(),
            company: company.to_string(),
            title: "Backend Engineer".to_string(),
            platform: "LinkedIn".to_string(),
            status: Some(Status::Applied),
            job_url: url.to_string(),
            notes: "Keywords added: Rust".to_string(),
            ..Default::default()
        }
    }

    fn fresh(dir: &TempDir) -> Tracker {
        Tracker::create(&dir.path().join("tracker.xlsx"), &[]).unwrap()
    }

    #[test]
    fn test_append_fills_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        assert_eq!(tracker.append(&record("Stripe", "https://a.example/1")).unwrap(), 2);
        assert_eq!(tracker.append(&record("Acme", "https://a.example/2")).unwrap(), 3);
        let records = tracker.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].1.company, "Stripe");
        assert_eq!(records[1].1.company, "Acme");
    }

    #[test]
    fn test_append_reuses_gap_but_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        tracker.append(&record("One", "u1")).unwrap();
        tracker.append(&record("Two", "u2")).unwrap();
        tracker.append(&record("Three", "u3")).unwrap();
        // Clear the identity cell of row 3 by hand, as a user deleting an entry would.
        tracker
            .applications_mut()
            .unwrap()
            .get_cell_mut((COL_COMPANY, 3))
            .set_value("");

        assert_eq!(tracker.append(&record("Four", "u4")).unwrap(), 3);
        assert_eq!(tracker.append(&record("Five", "u5")).unwrap(), 5);
        let companies: Vec<_> = tracker
            .records()
            .unwrap()
            .into_iter()
            .map(|(_, r)| r.company)
            .collect();
        assert_eq!(companies, vec!["One", "Four", "Three", "Five"]);
    }

    #[test]
    fn test_update_matches_by_substring_of_stored_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        tracker
            .append(&record("Stripe", "https://stripe.com/jobs/listing/backend/12345?src=li"))
            .unwrap();
        let row = tracker
            .update_status_by_url("stripe.com/jobs/listing/backend/12345", Status::Applied, "")
            .unwrap();
        assert_eq!(row, Some(2));
    }

    #[test]
    fn test_update_writes_status_and_appends_notes() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        tracker.append(&record("Stripe", "https://jobs.example/9")).unwrap();
        tracker
            .update_status_by_url("https://jobs.example/9", Status::Error, "session crashed")
            .unwrap();
        let (_, rec) = tracker.records().unwrap().remove(0);
        assert_eq!(rec.status, Some(Status::Error));
        assert_eq!(rec.notes, "Keywords added: Rust | session crashed");
    }

    #[test]
    fn test_update_unknown_url_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        tracker.append(&record("Stripe", "https://jobs.example/9")).unwrap();
        let before = tracker.records().unwrap();
        let row = tracker
            .update_status_by_url("https://elsewhere.example/1", Status::Applied, "x")
            .unwrap();
        assert_eq!(row, None);
        assert_eq!(tracker.records().unwrap(), before);
    }

    #[test]
    fn test_update_with_blank_url_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        tracker.append(&record("Stripe", "https://jobs.example/9")).unwrap();
        assert_eq!(
            tracker.update_status_by_url("  ", Status::Applied, "").unwrap(),
            None
        );
    }

    #[test]
    fn test_save_and_reopen_round_trips_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.xlsx");
        let mut tracker = Tracker::create(&path, &[]).unwrap();
        tracker.append(&record("Stripe", "https://jobs.example/9")).unwrap();
        tracker.save().unwrap();

        let reopened = Tracker::open(&path).unwrap();
        let records = reopened.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.company, "Stripe");
        assert_eq!(records[0].1.status, Some(Status::Applied));
        // No temp files left next to the tracker
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_record_outcome_missing_url_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.xlsx");
        let mut tracker = Tracker::create(&path, &[]).unwrap();
        tracker.append(&record("Stripe", "https://jobs.example/9")).unwrap();
        tracker.save().unwrap();

        assert_eq!(
            record_outcome(&path, "https://nope.example", Status::Applied, ""),
            None
        );
        assert_eq!(
            record_outcome(&path, "https://jobs.example/9", Status::ManualReviewNeeded, "form not detected"),
            Some(2)
        );
        let (_, rec) = Tracker::open(&path).unwrap().records().unwrap().remove(0);
        assert_eq!(rec.status, Some(Status::ManualReviewNeeded));
    }

    #[test]
    fn test_record_outcome_without_tracker_file_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            record_outcome(&dir.path().join("absent.xlsx"), "u", Status::Error, "boom"),
            None
        );
    }

    #[test]
    fn test_summary_counts_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = fresh(&dir);
        tracker.append(&record("A", "u1")).unwrap();
        tracker.append(&record("B", "u2")).unwrap();
        let mut offer = record("C", "u3");
        offer.status = Some(Status::Offer);
        tracker.append(&offer).unwrap();
        let mut blank = record("D", "u4");
        blank.status = None;
        tracker.append(&blank).unwrap();

        let summary = tracker.summary().unwrap();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.unclassified, 1);
        let count = |s| summary.by_status.iter().find(|(st, _)| *st == s).unwrap().1;
        assert_eq!(count(Status::Applied), 2);
        assert_eq!(count(Status::Offer), 1);
        assert_eq!(count(Status::Rejected), 0);
    }
}
