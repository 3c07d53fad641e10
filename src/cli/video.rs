//! Video commands: generate, styles, voices.

use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::Config;
use crate::model::{NarrationMode, VideoRequest};
use crate::video::{CLIP_DURATIONS, VideoGenerator};

use super::format::{format_report, format_style, format_voice};

#[derive(Debug, Subcommand)]
pub enum VideoCommand {
    /// Render a video for a post.
    ///
    /// Without `RUNWAY_API_KEY` a placeholder file is written in place of each
    /// clip; the rest of the pipeline runs as usual.
    Generate(GenerateArgs),

    /// List the available styles.
    Styles,

    /// List voices from the speech vendor. Requires `CARTESIA_API_KEY`.
    Voices,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Post ID, e.g. `EC-004`.
    #[arg(long)]
    post: String,

    /// Style key; see `handraiser video styles`.
    #[arg(long)]
    style: String,

    /// Add narration.
    #[arg(long, conflicts_with_all = ["no_voice", "both"])]
    voice: bool,

    /// No narration (the default).
    #[arg(long, conflicts_with = "both")]
    no_voice: bool,

    /// Render a narrated and a silent version for A/B testing.
    #[arg(long)]
    both: bool,

    /// Number of clips to chain, each continuing from the last frame of the previous.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10))]
    chain: u32,

    /// Seconds per clip: 5 or 10.
    #[arg(long, default_value_t = 5, value_parser = parse_duration)]
    duration: u32,
}

fn parse_duration(s: &str) -> Result<u32, String> {
    let secs: u32 = s.parse().map_err(|e| format!("{e}"))?;
    if CLIP_DURATIONS.contains(&secs) {
        Ok(secs)
    } else {
        let allowed: Vec<String> = CLIP_DURATIONS.iter().map(ToString::to_string).collect();
        Err(format!("clips can be {} seconds long", allowed.join(" or ")))
    }
}

impl GenerateArgs {
    /// The versions to render, in order.
    fn narrations(&self) -> Vec<NarrationMode> {
        if self.both {
            vec![NarrationMode::Voice, NarrationMode::Silent]
        } else if self.voice && !self.no_voice {
            vec![NarrationMode::Voice]
        } else {
            vec![NarrationMode::Silent]
        }
    }
}

pub(super) async fn cmd_generate(
    config: &Config,
    root: &Path,
    args: &GenerateArgs,
) -> Result<(), String> {
    let generator = VideoGenerator::new(config, root).map_err(|e| e.to_string())?;
    if args.both {
        eprintln!("A/B mode: rendering a narrated and a silent version");
    }

    let mut reports = Vec::new();
    for narration in args.narrations() {
        let request = VideoRequest {
            post_id: args.post.clone(),
            style: args.style.clone(),
            narration,
            chain: args.chain,
            duration: args.duration,
        };
        let report = generator
            .generate(&request)
            .await
            .map_err(|e| format!("video generation failed: {e}"))?;
        eprintln!("{}", format_report(&report));
        reports.push(report);
    }

    match reports.as_slice() {
        [voice, silent] if args.both => {
            println!("A (voice):  {}", voice.video_path.display());
            println!("B (silent): {}", silent.video_path.display());
        }
        _ => {
            for report in &reports {
                println!("{}", report.video_path.display());
            }
        }
    }
    Ok(())
}

pub(super) fn cmd_styles(config: &Config, root: &Path) -> Result<(), String> {
    let generator = VideoGenerator::new(config, root).map_err(|e| e.to_string())?;

    for style in generator.styles() {
        println!("{}", format_style(style));
    }
    Ok(())
}

pub(super) async fn cmd_voices(config: &Config, root: &Path) -> Result<(), String> {
    let generator = VideoGenerator::new(config, root).map_err(|e| e.to_string())?;
    let cartesia = generator.cartesia().map_err(|e| e.to_string())?;

    let voices = cartesia
        .list_voices()
        .await
        .map_err(|e| format!("failed to list voices: {e}"))?;

    eprintln!("{} voices available", voices.len());
    for voice in voices.iter().take(10) {
        println!("{}", format_voice(voice));
    }
    Ok(())
}
