//! Post types: what a hand-written markdown post looks like once read.

use std::path::PathBuf;

use jiff::civil::Date;

/// Optional `**Key:** value` lines near the top of a post file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostMetadata {
    pub vertical: Option<String>,
    pub pain_point: Option<String>,
    pub post_type: Option<String>,
    pub date: Option<Date>,
}

/// A post file resolved on disk.
#[derive(Debug, Clone)]
pub struct ScheduledPost {
    /// Identifier such as `EC-004`; the file stem when nothing better is known.
    pub id: String,
    pub path: PathBuf,
    /// First `# ` heading, or the file stem.
    pub title: String,
    pub metadata: PostMetadata,
    /// The `## Post Copy` block when present, otherwise the whole file.
    pub body: String,
}

/// The pieces of a post that prompt templates and narration draw on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub id: String,
    pub body: String,
    pub pain_point: String,
    pub key_phrase: String,
    pub key_words: String,
    pub vertical: String,
}

impl PostContent {
    /// Stand-in content used when a post file can't be found.
    pub fn sample(id: &str) -> Self {
        Self {
            id: id.to_string(),
            body: "Material costs up 40% this year. Most contractors are bleeding money \
                   without knowing it."
                .to_string(),
            pain_point: "Material Cost Overruns".to_string(),
            key_phrase: "Material costs up 40%".to_string(),
            key_words: "MATERIAL COSTS UP 40%".to_string(),
            vertical: vertical_from_id(id),
        }
    }

    /// Derive prompt content from a resolved post.
    pub fn from_post(post: &ScheduledPost) -> Self {
        let first_line = post
            .body
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
            .unwrap_or("");

        Self {
            id: post.id.clone(),
            body: post.body.clone(),
            pain_point: post
                .metadata
                .pain_point
                .clone()
                .unwrap_or_else(|| "Business Pain".to_string()),
            key_phrase: truncate_chars(first_line, 100).to_string(),
            key_words: truncate_chars(first_line, 50).to_uppercase(),
            vertical: post
                .metadata
                .vertical
                .clone()
                .unwrap_or_else(|| vertical_from_id(&post.id)),
        }
    }
}

/// `EC-004` → `EC`.
fn vertical_from_id(id: &str) -> String {
    truncate_chars(id, 2).to_uppercase()
}

/// Borrow at most `max` characters of `s`, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(body: &str, metadata: PostMetadata) -> ScheduledPost {
        ScheduledPost {
            id: "hv-002".into(),
            path: PathBuf::from("posts/hvac/hv-002.md"),
            title: "HV-002".into(),
            metadata,
            body: body.into(),
        }
    }

    #[test]
    fn key_phrase_skips_headings_and_blank_lines() {
        let p = post("# Title\n\n  Labor burden is invisible.  \nMore text.", PostMetadata::default());
        let content = PostContent::from_post(&p);

        assert_eq!(content.key_phrase, "Labor burden is invisible.");
        assert_eq!(content.key_words, "LABOR BURDEN IS INVISIBLE.");
        assert_eq!(content.pain_point, "Business Pain");
        assert_eq!(content.vertical, "HV");
    }

    #[test]
    fn metadata_overrides_fallbacks() {
        let p = post(
            "Copper doubled.",
            PostMetadata {
                vertical: Some("Electrical".into()),
                pain_point: Some("Material Cost Overruns".into()),
                ..PostMetadata::default()
            },
        );
        let content = PostContent::from_post(&p);

        assert_eq!(content.vertical, "Electrical");
        assert_eq!(content.pain_point, "Material Cost Overruns");
    }

    #[test]
    fn key_words_cap_at_fifty_characters() {
        let line = "x".repeat(120);
        let content = PostContent::from_post(&post(&line, PostMetadata::default()));

        assert_eq!(content.key_phrase.len(), 100);
        assert_eq!(content.key_words.len(), 50);
    }

    #[test]
    fn truncate_respects_multibyte_characters() {
        assert_eq!(truncate_chars("→→→→", 2), "→→");
        assert_eq!(truncate_chars("ab", 5), "ab");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn sample_uses_id_prefix_as_vertical() {
        let content = PostContent::sample("pl-009");
        assert_eq!(content.vertical, "PL");
        assert_eq!(content.key_phrase, "Material costs up 40%");
    }
}
