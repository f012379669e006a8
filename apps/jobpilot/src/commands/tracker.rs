use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{DEFAULT_BASE_RESUME, DEFAULT_RESUMES_DIR, DEFAULT_TRACKER};
use crate::config::Config;
use crate::errors::AppError;
use crate::tracker::{Tracker, TrackerSummary};

#[derive(Debug, Args)]
pub struct InitTrackerArgs {
    #[arg(long, default_value = DEFAULT_TRACKER)]
    pub tracker: PathBuf,

    /// Replace an existing tracker
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[arg(long, default_value = DEFAULT_TRACKER)]
    pub tracker: PathBuf,
}

pub fn init(config: &Config, args: InitTrackerArgs) -> Result<(), AppError> {
    if args.tracker.exists() && !args.force {
        return Err(AppError::Validation(format!(
            "{} already exists; pass --force to overwrite it",
            args.tracker.display()
        )));
    }
    Tracker::create(&args.tracker, &settings(config))?;
    println!("Tracker created: {}", args.tracker.display());
    Ok(())
}

pub fn summary(args: SummaryArgs) -> Result<(), AppError> {
    let tracker = Tracker::open(&args.tracker)?;
    let summary = tracker.summary()?;
    info!("Read {} applications from {}", summary.total, args.tracker.display());
    print!("{}", render_summary(&summary));
    Ok(())
}

/// Non-secret settings recorded on the Config sheet.
fn settings(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("Resume Folder", format!("./{DEFAULT_RESUMES_DIR}")),
        ("Base Resume File", DEFAULT_BASE_RESUME.to_string()),
        ("Full Name", config.full_name.clone()),
        ("Default Location", config.location.clone()),
        ("Phone Number", config.phone.clone()),
        ("Model", config.model.clone()),
    ]
}

fn render_summary(summary: &TrackerSummary) -> String {
    let mut out = format!("{:<22} {:>5}\n", "Total applications", summary.total);
    for (status, count) in summary.by_status.iter().filter(|(_, n)| *n > 0) {
        out.push_str(&format!("{:<22} {:>5}\n", status.as_str(), count));
    }
    if summary.unclassified > 0 {
        out.push_str(&format!("{:<22} {:>5}\n", "(no status)", summary.unclassified));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.xlsx");
        let args = || InitTrackerArgs {
            tracker: path.clone(),
            force: false,
        };
        init(&Config::default(), args()).unwrap();
        let err = init(&Config::default(), args()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_init_with_force_resets_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.xlsx");
        let mut tracker = Tracker::create(&path, &[]).unwrap();
        tracker
            .append(&crate::tracker::tests::record("Stripe", "https://jobs.example/1"))
            .unwrap();
        tracker.save().unwrap();

        init(
            &Config::default(),
            InitTrackerArgs {
                tracker: path.clone(),
                force: true,
            },
        )
        .unwrap();
        assert!(Tracker::open(&path).unwrap().records().unwrap().is_empty());
    }

    #[test]
    fn test_summary_missing_tracker_is_tracker_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = summary(SummaryArgs {
            tracker: dir.path().join("absent.xlsx"),
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Tracker(_)));
    }

    #[test]
    fn test_render_summary_lists_nonzero_statuses() {
        let summary = TrackerSummary {
            total: 3,
            by_status: vec![
                (Status::Applied, 2),
                (Status::Offer, 0),
                (Status::ManualReviewNeeded, 1),
            ],
            unclassified: 0,
        };
        let text = render_summary(&summary);
        assert!(text.contains("Applied"));
        assert!(text.contains("Manual Review Needed"));
        assert!(!text.contains("Offer"));
    }
}
