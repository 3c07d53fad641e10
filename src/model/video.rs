//! Video generation types: styles, requests, and what comes out.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A named prompt template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoStyle {
    /// CLI key, e.g. `pain-point`. Template files may omit it; the file stem is used.
    #[serde(default)]
    pub key: String,
    /// Display name, e.g. "Pain Point Illustration".
    pub name: String,
    /// Prompt text with `{key_phrase}`, `{pain_point}`, `{key_words}`, `{vertical}` slots.
    pub template: String,
    #[serde(default)]
    pub best_for: Vec<String>,
    #[serde(default)]
    pub voice_script: VoiceScript,
}

/// How much of the post is read aloud when narration is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceScript {
    /// First paragraph of the body, capped at 200 characters.
    Full,
    /// The key phrase as-is.
    KeyPhrase,
    /// The key phrase capped at 80 characters.
    #[default]
    Short,
}

/// Whether the final cut carries narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationMode {
    Voice,
    Silent,
}

impl NarrationMode {
    /// File-name suffix for the final artifact.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Voice => "voice",
            Self::Silent => "silent",
        }
    }
}

/// One video to produce.
#[derive(Debug, Clone)]
pub struct VideoRequest {
    pub post_id: String,
    pub style: String,
    pub narration: NarrationMode,
    /// Number of clips; 1 means no chaining.
    pub chain: u32,
    /// Seconds per clip.
    pub duration: u32,
}

/// A produced video file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoArtifact {
    /// Real media downloaded from the vendor (or assembled from such media).
    Rendered(PathBuf),
    /// A text file describing what would have been generated.
    Placeholder(PathBuf),
}

impl VideoArtifact {
    pub fn path(&self) -> &Path {
        match self {
            Self::Rendered(p) | Self::Placeholder(p) => p,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Summary of a finished generation, printed at the end of a run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub post_id: String,
    pub style: String,
    pub narration: NarrationMode,
    pub clips: u32,
    pub video_path: PathBuf,
    pub rendered: bool,
    pub prompt: String,
    /// `YYYYmmdd_HHMMSS`, shared by every file of the run.
    pub timestamp: String,
    pub cost_estimate: f64,
}

impl GenerationReport {
    /// Rough vendor spend in USD: pain-point clips run longer prompts.
    pub fn estimate_cost(style: &str, clips: u32) -> f64 {
        let per_clip = if style == "pain-point" { 2.50 } else { 1.75 };
        per_clip * f64::from(clips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_scales_with_clip_count() {
        assert!((GenerationReport::estimate_cost("pain-point", 1) - 2.50).abs() < f64::EPSILON);
        assert!((GenerationReport::estimate_cost("abstract", 3) - 5.25).abs() < f64::EPSILON);
    }

    #[test]
    fn voice_script_defaults_to_short() {
        let style: VideoStyle = toml::from_str(
            r#"
            key = "k"
            name = "N"
            template = "T"
            "#,
        )
        .unwrap();

        assert_eq!(style.voice_script, VoiceScript::Short);
        assert!(style.best_for.is_empty());
    }
}
