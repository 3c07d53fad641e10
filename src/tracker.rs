//! Engagement tracker workbook.
//!
//! Builds a three-sheet xlsx from static templates:
//!
//! ```text
//! Post Performance Tracker   one row per post: raw counters + derived formulas
//! Dashboard                  aggregates over the tracker sheet
//! Response Tracker           one row per prospect: response speed + stage
//! ```
//!
//! There is no runtime input. Derived cells are always formulas over the raw
//! cells beside them, so the sheet stays correct as rows are edited by hand.

mod formulas;
mod samples;
mod sheets;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rust_xlsxwriter::{Workbook, XlsxError};

/// Errors that can occur while building the tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, TrackerError>;

/// Default output location: `<root>/tracking/linkedin_engagement_tracker.xlsx`.
pub fn default_path(root: &Path) -> PathBuf {
    root.join("tracking").join("linkedin_engagement_tracker.xlsx")
}

/// Build the tracker workbook and write it to `path`, replacing any existing file.
pub fn build(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    sheets::post_performance(workbook.add_worksheet())?;
    sheets::dashboard(workbook.add_worksheet())?;
    sheets::response_tracker(workbook.add_worksheet())?;

    workbook.save(path)?;
    tracing::info!(path = %path.display(), "tracker written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn builds_xlsx_under_tracking_dir() {
        let dir = TempDir::new().unwrap();
        let path = default_path(dir.path());

        build(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        // xlsx is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn rebuild_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tracker.xlsx");
        fs::write(&path, "stale").unwrap();

        build(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_ne!(bytes, b"stale");
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn default_path_is_under_tracking() {
        assert_eq!(
            default_path(Path::new("/campaign")),
            PathBuf::from("/campaign/tracking/linkedin_engagement_tracker.xlsx")
        );
    }
}
