//! Style templates: what the vendor is asked to render, and what gets narrated.
//!
//! Templates live as one TOML file per style in the prompts directory:
//!
//! ```toml
//! # videos/runway/prompts/pain-point.toml
//! name = "Pain Point Illustration"
//! template = "Dramatic visualization: {pain_point}. ..."
//! best_for = ["emotional connection"]
//! voice_script = "full"
//! ```
//!
//! With no template files present, a built-in set is used.

use std::{fs, io, path::Path};

use crate::model::{PostContent, VideoStyle, VoiceScript, truncate_chars};

use super::{Result, VideoError};

/// The built-in styles.
pub fn default_styles() -> Vec<VideoStyle> {
    fn style(
        key: &str,
        name: &str,
        template: &str,
        best_for: [&str; 3],
        voice_script: VoiceScript,
    ) -> VideoStyle {
        VideoStyle {
            key: key.to_string(),
            name: name.to_string(),
            template: template.to_string(),
            best_for: best_for.iter().map(ToString::to_string).collect(),
            voice_script,
        }
    }

    vec![
        style(
            "abstract",
            "Abstract Motion",
            "Abstract motion graphics visualization: {key_phrase}. Flowing geometric shapes, \
             professional blue and orange color palette, smooth camera movement, cinematic \
             lighting. 5 seconds, high quality.",
            ["attention hooks", "brand awareness", "pattern interrupt"],
            VoiceScript::Short,
        ),
        style(
            "pain-point",
            "Pain Point Illustration",
            "Dramatic visualization: {pain_point}. Show the frustration and cost visually. \
             Dark moody lighting transitioning to bright solution. Construction or industrial \
             setting, realistic style. 5 seconds, cinematic.",
            [
                "emotional connection",
                "problem awareness",
                "contractor empathy",
            ],
            VoiceScript::Full,
        ),
        style(
            "text-overlay",
            "Text Overlay",
            "Kinetic typography animation: Words appearing with dramatic impact - '{key_words}'. \
             Bold sans-serif font, dynamic zoom and movement effects, blurred construction \
             backdrop. 5 seconds, professional.",
            [
                "message reinforcement",
                "statistic highlights",
                "call-to-action",
            ],
            VoiceScript::KeyPhrase,
        ),
        style(
            "before-after",
            "Before-After Transformation",
            "Split screen transformation: Left side shows chaos and frustration (messy \
             paperwork, stressed contractor), right side shows calm and organized (clean \
             dashboard, happy team). Smooth transition between both. 5 seconds.",
            [
                "solution reveal",
                "value demonstration",
                "transformation stories",
            ],
            VoiceScript::Full,
        ),
    ]
}

/// Load style templates from `prompts_dir`, sorted by key.
///
/// Falls back to [`default_styles`] when the directory is missing or holds
/// no `.toml` files. A template file that doesn't parse is an error.
pub fn load_styles(prompts_dir: &Path) -> Result<Vec<VideoStyle>> {
    let entries = match fs::read_dir(prompts_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(default_styles()),
        Err(e) => return Err(e.into()),
    };

    let mut styles = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }

        let contents = fs::read_to_string(&path)?;
        let mut style: VideoStyle =
            toml::from_str(&contents).map_err(|source| VideoError::StyleFile {
                path: path.clone(),
                source,
            })?;
        if style.key.is_empty() {
            style.key = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        styles.push(style);
    }

    if styles.is_empty() {
        tracing::debug!(dir = %prompts_dir.display(), "no style templates, using built-ins");
        return Ok(default_styles());
    }

    styles.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(styles)
}

/// Look up a style by key.
pub fn find_style<'a>(styles: &'a [VideoStyle], key: &str) -> Result<&'a VideoStyle> {
    styles
        .iter()
        .find(|s| s.key == key)
        .ok_or_else(|| VideoError::UnknownStyle {
            name: key.to_string(),
            available: styles.iter().map(|s| s.key.clone()).collect(),
        })
}

/// Fill a style's template slots from the post.
pub fn render_prompt(style: &VideoStyle, post: &PostContent) -> String {
    style
        .template
        .replace("{key_phrase}", &post.key_phrase)
        .replace("{pain_point}", &post.pain_point)
        .replace("{key_words}", &post.key_words)
        .replace("{vertical}", &post.vertical)
}

/// The narration text for a style.
pub fn voice_script(style: &VideoStyle, post: &PostContent) -> String {
    let text = match style.voice_script {
        VoiceScript::Full => {
            let paragraph = post
                .body
                .split("\n\n")
                .map(str::trim)
                .find(|p| !p.is_empty())
                .unwrap_or(&post.body);
            truncate_chars(paragraph, 200).to_string()
        }
        VoiceScript::KeyPhrase => post.key_phrase.clone(),
        VoiceScript::Short => truncate_chars(&post.key_phrase, 80).to_string(),
    };

    match style.key.as_str() {
        "pain-point" => format!("{text}... Sound familiar?"),
        "before-after" => format!("{text} But it doesn't have to be this way."),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn post() -> PostContent {
        PostContent {
            id: "EC-004".into(),
            body: "\n\nCopper is up 40% this year.\nMargins vanish.\n\nSecond paragraph.".into(),
            pain_point: "Material Cost Overruns".into(),
            key_phrase: "Copper is up 40% this year.".into(),
            key_words: "COPPER IS UP 40% THIS YEAR.".into(),
            vertical: "EC".into(),
        }
    }

    fn style(key: &str) -> VideoStyle {
        default_styles().into_iter().find(|s| s.key == key).unwrap()
    }

    #[test]
    fn templates_fill_every_slot() {
        let prompt = render_prompt(&style("text-overlay"), &post());
        assert!(prompt.contains("'COPPER IS UP 40% THIS YEAR.'"));
        assert!(!prompt.contains('{'));

        let prompt = render_prompt(&style("pain-point"), &post());
        assert!(prompt.starts_with("Dramatic visualization: Material Cost Overruns."));
    }

    #[test]
    fn pain_point_narrates_first_paragraph_with_hook() {
        let script = voice_script(&style("pain-point"), &post());
        assert_eq!(
            script,
            "Copper is up 40% this year.\nMargins vanish.... Sound familiar?"
        );
    }

    #[test]
    fn before_after_adds_hopeful_turn() {
        let script = voice_script(&style("before-after"), &post());
        assert!(script.ends_with(" But it doesn't have to be this way."));
    }

    #[test]
    fn short_script_caps_key_phrase() {
        let mut p = post();
        p.key_phrase = "y".repeat(150);

        assert_eq!(voice_script(&style("abstract"), &p).len(), 80);
        assert_eq!(voice_script(&style("text-overlay"), &p).len(), 150);
    }

    #[test]
    fn full_script_caps_paragraph() {
        let mut p = post();
        p.body = "z".repeat(500);

        let script = voice_script(&style("pain-point"), &p);
        assert_eq!(script, format!("{}... Sound familiar?", "z".repeat(200)));
    }

    #[test]
    fn missing_prompts_dir_uses_defaults() {
        let styles = load_styles(Path::new("/nonexistent/prompts")).unwrap();
        assert_eq!(styles, default_styles());
    }

    #[test]
    fn prompts_dir_without_templates_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

        let styles = load_styles(dir.path()).unwrap();
        assert_eq!(styles.len(), 4);
    }

    #[test]
    fn template_files_replace_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("testimonial.toml"),
            "name = \"Testimonial\"\ntemplate = \"A {vertical} owner smiling\"\nvoice_script = \"key_phrase\"\n",
        )
        .unwrap();

        let styles = load_styles(dir.path()).unwrap();

        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].key, "testimonial");
        assert_eq!(styles[0].voice_script, VoiceScript::KeyPhrase);
        assert_eq!(render_prompt(&styles[0], &post()), "A EC owner smiling");
    }

    #[test]
    fn broken_template_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.toml"), "name = ").unwrap();

        let err = load_styles(dir.path()).unwrap_err();
        assert!(matches!(err, VideoError::StyleFile { .. }));
    }

    #[test]
    fn unknown_style_lists_options() {
        let styles = default_styles();
        let err = find_style(&styles, "vertical-split").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("vertical-split"));
        assert!(message.contains("abstract, pain-point, text-overlay, before-after"));
    }
}
