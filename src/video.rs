//! Short promotional clips for posts.
//!
//! A post and a style template become a vendor prompt; the vendor renders a
//! clip (or a chain of clips), optional narration is synthesized, and the
//! pieces are assembled locally with ffmpeg. Without API keys everything
//! degrades to placeholder files so the pipeline can be exercised offline.

mod cartesia;
mod ffmpeg;
mod pipeline;
mod runway;
mod styles;

pub use cartesia::Voice;
pub use pipeline::VideoGenerator;
pub use runway::CLIP_DURATIONS;

use ffmpeg::FfmpegError;

use std::io;
use std::path::{Path, PathBuf};

/// Errors from video generation.
#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("unknown style '{name}'; options: {}", .available.join(", "))]
    UnknownStyle { name: String, available: Vec<String> },

    #[error("invalid style template {path}: {source}")]
    StyleFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{vendor} returned {status}: {body}")]
    Vendor {
        vendor: &'static str,
        status: u16,
        body: String,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("task {id} failed: {reason}")]
    TaskFailed { id: String, reason: String },

    #[error("task {id} still running after {attempts} status checks")]
    TaskTimedOut { id: String, attempts: u32 },

    #[error("task {0} succeeded without an output URL")]
    NoOutput(String),

    #[error("{0} is not set")]
    MissingApiKey(&'static str),

    #[error(transparent)]
    Ffmpeg(#[from] FfmpegError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, VideoError>;

/// Where video inputs and outputs live under the project root.
#[derive(Debug, Clone)]
pub struct VideoPaths {
    pub posts_dir: PathBuf,
    /// Raw and chained clips, plus placeholders.
    pub videos_dir: PathBuf,
    /// Style template files.
    pub prompts_dir: PathBuf,
    pub audio_dir: PathBuf,
    /// Finished cuts.
    pub final_dir: PathBuf,
}

impl VideoPaths {
    pub fn for_root(root: &Path) -> Self {
        let videos_dir = root.join("videos").join("runway");
        Self {
            posts_dir: root.join("posts"),
            prompts_dir: videos_dir.join("prompts"),
            audio_dir: videos_dir.join("audio"),
            final_dir: videos_dir.join("final"),
            videos_dir,
        }
    }

    /// Create the output directories.
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [&self.videos_dir, &self.audio_dir, &self.final_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Turn a non-2xx vendor response into an error carrying the body text.
async fn check(vendor: &'static str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(VideoError::Vendor {
        vendor,
        status: status.as_u16(),
        body,
    })
}
