//! Post scheduling: which post goes out today, and getting it onto the clipboard.
//!
//! The calendar lives at `<root>/posts/schedule.json`:
//!
//! ```json
//! {
//!   "week1":   { "monday": "electrical/EC-001.md", "wednesday": "hvac/HV-001.md" },
//!   "default": { "monday": "electrical/EC-002.md" }
//! }
//! ```
//!
//! Paths are relative to the posts directory. Weeks rotate on the ISO week
//! number (see [`calendar::week_key`]); a week with no entry of its own uses
//! `default`.

mod calendar;
mod handoff;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use jiff::civil::{Date, Weekday};

pub use calendar::{capitalize, day_name, parse_day, week_key};
pub use handoff::{Desktop, Echo, Handoff, hold_clipboard, is_clipboard_holder};

use crate::content::{self, ContentError};
use crate::model::{Schedule, ScheduledPost};

/// Errors that can occur while resolving or publishing a post.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule file not found: {0}")]
    ScheduleNotFound(PathBuf),

    #[error("invalid schedule at {path}: {source}")]
    InvalidSchedule {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("post not found: {0}")]
    PostNotFound(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, ScheduleError>;

/// What the user asked to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Today's entry in the current week.
    Today,
    /// A named day in the current week.
    Day(Weekday),
    /// A post identifier such as `EC-001`.
    Post(String),
}

impl Target {
    /// Interpret the optional positional argument: a day name, else a post ID.
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => Self::Today,
            Some(s) => parse_day(s).map_or_else(|| Self::Post(s.to_string()), Self::Day),
        }
    }
}

/// Where a target led.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A post file to publish.
    Post(PathBuf),
    /// The calendar has nothing for this day. Not an error.
    NothingScheduled { day: Weekday },
}

/// One row of `post --list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub week: String,
    pub day: String,
    pub path: String,
    /// `None` when the file doesn't exist.
    pub title: Option<String>,
}

/// Resolves posts against a posts directory and its calendar.
pub struct Scheduler {
    posts_dir: PathBuf,
}

impl Scheduler {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    /// `<root>/posts`.
    pub fn for_root(root: &Path) -> Self {
        Self::new(root.join("posts"))
    }

    pub fn schedule_path(&self) -> PathBuf {
        self.posts_dir.join("schedule.json")
    }

    /// Load the calendar. Missing or malformed files are errors.
    pub fn load_schedule(&self) -> Result<Schedule> {
        let path = self.schedule_path();
        let json = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ScheduleError::ScheduleNotFound(path));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&json).map_err(|source| ScheduleError::InvalidSchedule { path, source })
    }

    /// Resolve a target to a post file, relative to `today`.
    pub fn resolve(&self, schedule: &Schedule, target: &Target, today: Date) -> Result<Resolution> {
        let day = match target {
            Target::Post(id) => return self.find_by_id(schedule, id).map(Resolution::Post),
            Target::Today => today.weekday(),
            Target::Day(day) => *day,
        };

        let week = week_key(today);
        let entry = schedule
            .week(&week)
            .and_then(|days| days.get(day_name(day)));

        tracing::debug!(%week, day = day_name(day), ?entry, "calendar lookup");

        Ok(match entry {
            Some(rel) => Resolution::Post(self.posts_dir.join(rel)),
            None => Resolution::NothingScheduled { day },
        })
    }

    /// Find a post by ID: calendar paths first, then file stems on disk.
    pub fn find_by_id(&self, schedule: &Schedule, post_id: &str) -> Result<PathBuf> {
        let needle = post_id.to_uppercase();

        if let Some((_, _, rel)) = schedule
            .entries()
            .find(|(_, _, rel)| rel.to_uppercase().contains(&needle))
        {
            return Ok(self.posts_dir.join(rel));
        }

        content::find_markdown_by_stem(&self.posts_dir, post_id)
            .ok_or_else(|| ScheduleError::PostNotFound(post_id.to_string()))
    }

    /// Every calendar entry with its title, in file order.
    pub fn list(&self, schedule: &Schedule) -> Vec<ListingEntry> {
        schedule
            .entries()
            .map(|(week, day, rel)| ListingEntry {
                week: week.to_string(),
                day: day.to_string(),
                path: rel.to_string(),
                title: content::title_of(&self.posts_dir.join(rel)).ok(),
            })
            .collect()
    }
}

/// Read the post copy and hand it off: clipboard first, then the browser.
///
/// The post is fully read before anything is handed off, so a missing
/// fence never leaves stale text on the clipboard.
pub fn publish(path: &Path, url: &str, handoff: &mut dyn Handoff) -> core::result::Result<ScheduledPost, String> {
    let post = content::read_post_strict(path).map_err(|e| e.to_string())?;
    handoff.copy(&post.body)?;
    handoff.open(url)?;
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;
    use tempfile::TempDir;

    const SCHEDULE: &str = r#"{
        "week2": { "monday": "electrical/EC-001.md", "wednesday": "hvac/HV-001.md" },
        "default": { "monday": "electrical/EC-002.md", "friday": "plumbing/PL-001.md" }
    }"#;

    const POST_BODY: &str = "# EC-001: Copper\n\n## Post Copy\n\n```\nCopper is up.\n```\n";

    fn fixture() -> (TempDir, Scheduler) {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(posts.join("electrical")).unwrap();
        fs::create_dir_all(posts.join("drafts")).unwrap();
        fs::write(posts.join("schedule.json"), SCHEDULE).unwrap();
        fs::write(posts.join("electrical/EC-001.md"), POST_BODY).unwrap();
        fs::write(posts.join("drafts/EC-009-draft.md"), "# EC-009").unwrap();
        let scheduler = Scheduler::for_root(dir.path());
        (dir, scheduler)
    }

    #[derive(Default)]
    struct Recorder {
        copied: Vec<String>,
        opened: Vec<String>,
    }

    impl Handoff for Recorder {
        fn copy(&mut self, text: &str) -> core::result::Result<(), String> {
            self.copied.push(text.to_string());
            Ok(())
        }

        fn open(&mut self, url: &str) -> core::result::Result<(), String> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    // 2025-01-06 is a Monday in ISO week 2; 2025-01-13 is a Monday in week 3.
    const WEEK2_MONDAY: Date = date(2025, 1, 6);
    const WEEK3_MONDAY: Date = date(2025, 1, 13);

    #[test]
    fn target_parsing() {
        assert_eq!(Target::parse(None), Target::Today);
        assert_eq!(Target::parse(Some("Wednesday")), Target::Day(Weekday::Wednesday));
        assert_eq!(Target::parse(Some("ec-001")), Target::Post("ec-001".into()));
    }

    #[test]
    fn today_resolves_in_current_week() {
        let (_dir, scheduler) = fixture();
        let schedule = scheduler.load_schedule().unwrap();

        let resolved = scheduler
            .resolve(&schedule, &Target::Today, WEEK2_MONDAY)
            .unwrap();

        assert_eq!(
            resolved,
            Resolution::Post(scheduler.posts_dir.join("electrical/EC-001.md"))
        );
    }

    #[test]
    fn named_day_uses_current_week() {
        let (_dir, scheduler) = fixture();
        let schedule = scheduler.load_schedule().unwrap();

        let resolved = scheduler
            .resolve(&schedule, &Target::Day(Weekday::Wednesday), WEEK2_MONDAY)
            .unwrap();

        assert_eq!(
            resolved,
            Resolution::Post(scheduler.posts_dir.join("hvac/HV-001.md"))
        );
    }

    #[test]
    fn missing_week_falls_back_to_default() {
        let (_dir, scheduler) = fixture();
        let schedule = scheduler.load_schedule().unwrap();

        let resolved = scheduler
            .resolve(&schedule, &Target::Today, WEEK3_MONDAY)
            .unwrap();

        assert_eq!(
            resolved,
            Resolution::Post(scheduler.posts_dir.join("electrical/EC-002.md"))
        );
    }

    #[test]
    fn unscheduled_day_is_not_an_error() {
        let (_dir, scheduler) = fixture();
        let schedule = scheduler.load_schedule().unwrap();

        let resolved = scheduler
            .resolve(&schedule, &Target::Day(Weekday::Tuesday), WEEK2_MONDAY)
            .unwrap();

        assert_eq!(
            resolved,
            Resolution::NothingScheduled {
                day: Weekday::Tuesday
            }
        );
    }

    #[test]
    fn post_id_searches_calendar_then_disk() {
        let (_dir, scheduler) = fixture();
        let schedule = scheduler.load_schedule().unwrap();

        let from_calendar = scheduler.find_by_id(&schedule, "hv-001").unwrap();
        assert_eq!(from_calendar, scheduler.posts_dir.join("hvac/HV-001.md"));

        let from_disk = scheduler.find_by_id(&schedule, "EC-009").unwrap();
        assert_eq!(from_disk, scheduler.posts_dir.join("drafts/EC-009-draft.md"));

        let err = scheduler.find_by_id(&schedule, "XX-999").unwrap_err();
        assert!(matches!(err, ScheduleError::PostNotFound(_)));
    }

    #[test]
    fn missing_schedule_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Scheduler::for_root(dir.path()).load_schedule().unwrap_err();

        assert!(matches!(err, ScheduleError::ScheduleNotFound(_)));
    }

    #[test]
    fn malformed_schedule_fails() {
        let (_dir, scheduler) = fixture();
        fs::write(scheduler.schedule_path(), "{ \"week1\": [] }").unwrap();

        let err = scheduler.load_schedule().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSchedule { .. }));
    }

    #[test]
    fn listing_marks_missing_files() {
        let (_dir, scheduler) = fixture();
        let schedule = scheduler.load_schedule().unwrap();

        let listing = scheduler.list(&schedule);

        assert_eq!(listing.len(), 4);
        assert_eq!(listing[0].week, "week2");
        assert_eq!(listing[0].title.as_deref(), Some("EC-001: Copper"));
        assert_eq!(listing[1].title, None);
        assert_eq!(listing[3].day, "friday");
    }

    #[test]
    fn publish_copies_then_opens() {
        let (_dir, scheduler) = fixture();
        let mut recorder = Recorder::default();

        let post = publish(
            &scheduler.posts_dir.join("electrical/EC-001.md"),
            "https://example.test/feed",
            &mut recorder,
        )
        .unwrap();

        assert_eq!(post.title, "EC-001: Copper");
        assert_eq!(recorder.copied, vec!["Copper is up.".to_string()]);
        assert_eq!(recorder.opened, vec!["https://example.test/feed".to_string()]);
    }

    #[test]
    fn publish_without_fence_touches_nothing() {
        let (_dir, scheduler) = fixture();
        let mut recorder = Recorder::default();

        let err = publish(
            &scheduler.posts_dir.join("drafts/EC-009-draft.md"),
            "https://example.test/feed",
            &mut recorder,
        )
        .unwrap_err();

        assert!(err.contains("could not extract post content"));
        assert!(recorder.copied.is_empty());
        assert!(recorder.opened.is_empty());
    }

    #[test]
    fn publish_missing_file_fails() {
        let (_dir, scheduler) = fixture();
        let mut recorder = Recorder::default();

        let err = publish(
            &scheduler.posts_dir.join("hvac/HV-001.md"),
            "https://example.test/feed",
            &mut recorder,
        )
        .unwrap_err();

        assert!(err.contains("post file not found"));
    }
}
