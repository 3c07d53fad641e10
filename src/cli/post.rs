//! The `post` command: resolve a scheduled post and hand it off.

use std::path::Path;

use clap::Args;
use jiff::Zoned;

use crate::config::Config;
use crate::scheduler::{
    Desktop, Echo, Handoff, Resolution, ScheduleError, Scheduler, Target, capitalize, day_name,
    publish,
};

use super::format::{format_listing, format_loaded};

#[derive(Debug, Args)]
pub struct PostArgs {
    /// Day name (`monday`) or post ID (`EC-001`). Defaults to today.
    target: Option<String>,

    /// List every scheduled post instead of posting.
    #[arg(long, conflicts_with = "target")]
    list: bool,

    /// Print the post text instead of copying it and opening the browser.
    #[arg(long)]
    dry_run: bool,
}

pub(super) fn cmd_post(config: &Config, root: &Path, args: &PostArgs) -> Result<(), String> {
    let scheduler = Scheduler::for_root(root);
    let schedule = scheduler.load_schedule().map_err(|e| e.to_string())?;

    if args.list {
        let mut week = None;
        for entry in scheduler.list(&schedule) {
            if week.as_deref() != Some(entry.week.as_str()) {
                println!("{}:", entry.week.to_uppercase());
                week = Some(entry.week.clone());
            }
            println!("{}", format_listing(&entry));
        }
        return Ok(());
    }

    let target = Target::parse(args.target.as_deref());
    let today = Zoned::now().date();
    let path = match scheduler.resolve(&schedule, &target, today) {
        Ok(Resolution::Post(path)) => path,
        Ok(Resolution::NothingScheduled { day }) => {
            println!("No post scheduled for {}", capitalize(day_name(day)));
            eprintln!("Pick one directly: handraiser post <POST_ID>");
            return Ok(());
        }
        Err(ScheduleError::PostNotFound(id)) => {
            return Err(format!(
                "post not found: {id}\n  see scheduled posts with: handraiser post --list"
            ));
        }
        Err(e) => return Err(e.to_string()),
    };

    let mut handoff: Box<dyn Handoff> = if args.dry_run {
        Box::new(Echo)
    } else {
        Box::new(Desktop)
    };
    let post = publish(&path, &config.linkedin_url, handoff.as_mut())?;

    eprintln!("{}", format_loaded(&post));
    if !args.dry_run {
        eprintln!("Copied to clipboard and opened {}", config.linkedin_url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn args(target: Option<&str>, list: bool) -> PostArgs {
        PostArgs {
            target: target.map(ToString::to_string),
            list,
            dry_run: true,
        }
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("posts/electrical");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            dir.path().join("posts/schedule.json"),
            r#"{"default": {"monday": "electrical/EC-001.md", "tuesday": "electrical/EC-404.md"}}"#,
        )
        .unwrap();
        fs::write(
            posts.join("EC-001.md"),
            "# EC-001\n\n## Post Copy\n\n```\nCopper is up.\n```\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn missing_schedule_fails() {
        let dir = TempDir::new().unwrap();
        let err = cmd_post(&Config::default(), dir.path(), &args(None, false)).unwrap_err();
        assert!(err.contains("schedule file not found"));
    }

    #[test]
    fn listing_succeeds_with_missing_files() {
        let dir = project();
        cmd_post(&Config::default(), dir.path(), &args(None, true)).unwrap();
    }

    #[test]
    fn dry_run_by_id() {
        let dir = project();
        cmd_post(&Config::default(), dir.path(), &args(Some("ec-001"), false)).unwrap();
    }

    #[test]
    fn scheduled_file_missing_fails() {
        let dir = project();
        let err = cmd_post(&Config::default(), dir.path(), &args(Some("EC-404"), false))
            .unwrap_err();
        assert!(err.contains("post file not found"));
    }

    #[test]
    fn unknown_id_points_at_listing() {
        let dir = project();
        let err = cmd_post(&Config::default(), dir.path(), &args(Some("ZZ-999"), false))
            .unwrap_err();
        assert!(err.contains("handraiser post --list"));
    }
}
