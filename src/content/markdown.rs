//! Pattern-based extraction from hand-written post markdown.
//!
//! Posts follow a loose convention rather than a grammar:
//!
//! ```text
//! # EC-004: Copper Spike
//!
//! **Vertical:** Electrical
//! **Pain Point:** Material Cost Overruns
//!
//! ## Post Copy
//!
//! ```
//! <text that gets published>
//! ```
//! ```

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;

use crate::model::PostMetadata;

static POST_COPY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)## Post Copy\s*```\s*(.*?)\s*```").expect("post copy pattern is valid")
});

static ANY_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("fence pattern is valid"));

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("title pattern is valid"));

static META_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\*\*([^*:]+):\*\*\s*(.+?)\s*$").expect("metadata pattern is valid")
});

/// The publishable text of a post.
///
/// Takes the fenced block following `## Post Copy`; without that heading,
/// the first fenced block anywhere. `None` when the file has no fence.
pub fn extract_post_copy(text: &str) -> Option<String> {
    POST_COPY
        .captures(text)
        .or_else(|| ANY_FENCE.captures(text))
        .map(|c| c[1].trim().to_string())
}

/// First level-one heading.
pub fn extract_title(text: &str) -> Option<String> {
    TITLE.captures(text).map(|c| c[1].trim().to_string())
}

/// `**Key:** value` lines. Unknown keys are ignored; first occurrence wins.
pub fn extract_metadata(text: &str) -> PostMetadata {
    let mut meta = PostMetadata::default();

    for cap in META_LINE.captures_iter(text) {
        let value = cap[2].to_string();
        match cap[1].trim().to_lowercase().as_str() {
            "vertical" if meta.vertical.is_none() => meta.vertical = Some(value),
            "pain point" if meta.pain_point.is_none() => meta.pain_point = Some(value),
            "post type" | "type" if meta.post_type.is_none() => meta.post_type = Some(value),
            "date" | "date posted" if meta.date.is_none() => {
                meta.date = value.parse::<Date>().ok();
            }
            _ => {}
        }
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_copy_block_is_extracted_exactly() {
        let text = "# T\n\n```\nnot this one\n```\n\n## Post Copy\n\n```\nLine one.\n\nLine two.\n```\n";
        assert_eq!(extract_post_copy(text).as_deref(), Some("Line one.\n\nLine two."));
    }

    #[test]
    fn falls_back_to_first_fence() {
        let text = "# T\n\nIntro.\n\n```\n  First block.  \n```\n\n```\nSecond.\n```";
        assert_eq!(extract_post_copy(text).as_deref(), Some("First block."));
    }

    #[test]
    fn no_fence_is_none() {
        assert_eq!(extract_post_copy("# T\n\n## Post Copy\n\nplain text"), None);
        assert_eq!(extract_post_copy(""), None);
    }

    #[test]
    fn unterminated_fence_is_none() {
        assert_eq!(extract_post_copy("## Post Copy\n```\nnever closed"), None);
    }

    #[test]
    fn title_is_first_h1_not_h2() {
        let text = "intro\n## Section\n# Real Title  \n# Second";
        assert_eq!(extract_title(text).as_deref(), Some("Real Title"));
        assert_eq!(extract_title("## only h2"), None);
    }

    #[test]
    fn metadata_lines_are_parsed() {
        let text = "# HV-001\n\n**Vertical:** HVAC\n**Pain Point:** Labor Burden Blindness\n\
                    **Post Type:** Hand-Raiser\n**Date:** 2025-01-15\n**Owner:** me\n";
        let meta = extract_metadata(text);

        assert_eq!(meta.vertical.as_deref(), Some("HVAC"));
        assert_eq!(meta.pain_point.as_deref(), Some("Labor Burden Blindness"));
        assert_eq!(meta.post_type.as_deref(), Some("Hand-Raiser"));
        assert_eq!(meta.date, Some(jiff::civil::date(2025, 1, 15)));
    }

    #[test]
    fn bad_date_is_dropped() {
        let meta = extract_metadata("**Date:** next tuesday");
        assert_eq!(meta.date, None);
    }
}
