//! Tracker commands: build.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::tracker;

#[derive(Debug, Subcommand)]
pub enum TrackerCommand {
    /// Write the engagement tracker workbook, replacing any existing file.
    Build {
        /// Output file. Defaults to `<root>/tracking/linkedin_engagement_tracker.xlsx`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub(super) fn cmd_build(root: &Path, out: Option<PathBuf>) -> Result<(), String> {
    let path = out.unwrap_or_else(|| tracker::default_path(root));

    tracker::build(&path).map_err(|e| format!("failed to build tracker: {e}"))?;

    println!("{}", path.display());
    eprintln!("Sheets: Post Performance Tracker, Dashboard, Response Tracker");
    Ok(())
}
