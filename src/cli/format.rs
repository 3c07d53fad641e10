//! Output formatting for CLI display.

use crate::model::{GenerationReport, ScheduledPost, VideoStyle, truncate_chars};
use crate::scheduler::{ListingEntry, capitalize};
use crate::video::Voice;

/// Multi-line summary of a finished generation.
pub(super) fn format_report(report: &GenerationReport) -> String {
    let kind = if report.rendered {
        "video"
    } else {
        "placeholder"
    };
    format!(
        "{} / {} [{}] {} clip(s), {kind}\n  run: {}\n  prompt: {}\n  est. cost: ${:.2}",
        report.post_id,
        report.style,
        report.narration.suffix(),
        report.clips,
        report.timestamp,
        truncate_chars(&report.prompt, 100),
        report.cost_estimate,
    )
}

pub(super) fn format_style(style: &VideoStyle) -> String {
    let best_for = if style.best_for.is_empty() {
        "-".to_string()
    } else {
        style.best_for.join(", ")
    };
    format!("{}\n  {}\n  best for: {best_for}", style.key, style.name)
}

pub(super) fn format_voice(voice: &Voice) -> String {
    let description = voice.description.as_deref().unwrap_or("-");
    format!(
        "{}\n  id: {}\n  {}",
        voice.name,
        voice.id,
        truncate_chars(description, 60)
    )
}

/// The post `post` handed off: title and file, then whatever metadata it carries.
pub(super) fn format_loaded(post: &ScheduledPost) -> String {
    let meta = &post.metadata;
    let details: Vec<String> = [
        meta.vertical.clone(),
        meta.post_type.clone(),
        meta.date.map(|d| d.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let loaded = format!("Loaded: {} ({})", post.title, post.path.display());
    if details.is_empty() {
        loaded
    } else {
        format!("{loaded}\n  {}", details.join(" · "))
    }
}

/// One `post --list` line: `Monday       → Title`.
pub(super) fn format_listing(entry: &ListingEntry) -> String {
    let target = match &entry.title {
        Some(title) => title.clone(),
        None => format!("{} (NOT FOUND)", entry.path),
    };
    format!("  {:<12} → {target}", capitalize(&entry.day))
}
