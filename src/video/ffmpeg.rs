//! Local media assembly via the `ffmpeg` binary.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;

/// Crossfade length between chained clips, in seconds.
pub const FADE_SECS: f64 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("{} not found; install ffmpeg or set `ffmpeg` in the config", .0.display())]
    NotInstalled(PathBuf),

    #[error("ffmpeg failed: {stderr}")]
    Failed { stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, FfmpegError>;

/// Handle on the ffmpeg program.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Lay `audio` under `video`, cutting to the shorter of the two.
    pub async fn merge_audio(&self, video: &Path, audio: &Path, out: &Path) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("-i")
            .arg(video)
            .arg("-i")
            .arg(audio)
            .args(["-c:v", "copy", "-c:a", "aac", "-shortest"])
            .arg(out);
        self.run(cmd).await
    }

    /// Grab the last frame of `clip` as a PNG.
    pub async fn extract_last_frame(&self, clip: &Path, png: &Path) -> Result<()> {
        let mut cmd = self.command();
        cmd.args(["-sseof", "-0.1", "-i"])
            .arg(clip)
            .args(["-frames:v", "1", "-update", "1"])
            .arg(png);
        self.run(cmd).await
    }

    /// Join `clips` (each `clip_secs` long) with crossfades into `out`.
    pub async fn concat_crossfade(&self, clips: &[PathBuf], clip_secs: u32, out: &Path) -> Result<()> {
        if clips.len() < 2 {
            if let Some(only) = clips.first() {
                tokio::fs::copy(only, out).await?;
            }
            return Ok(());
        }

        let mut cmd = self.command();
        for clip in clips {
            cmd.arg("-i").arg(clip);
        }
        cmd.arg("-filter_complex")
            .arg(crossfade_filter(clips.len(), clip_secs, FADE_SECS))
            .arg("-map")
            .arg(format!("[v{}]", clips.len() - 1))
            .args(["-c:v", "libx264", "-pix_fmt", "yuv420p", "-an"])
            .arg(out);
        self.run(cmd).await
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-y", "-loglevel", "error"]);
        cmd
    }

    async fn run(&self, mut cmd: Command) -> Result<()> {
        let output: Output = cmd.output().await.map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                FfmpegError::NotInstalled(self.program.clone())
            } else {
                FfmpegError::Io(e)
            }
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(FfmpegError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// `xfade` filter graph chaining `count` inputs of `clip_secs` each.
///
/// The k-th fade starts at `k * (clip_secs - fade)`: each join eats `fade`
/// seconds of overlap. The last output label is `[v{count-1}]`.
pub fn crossfade_filter(count: usize, clip_secs: u32, fade: f64) -> String {
    let step = f64::from(clip_secs) - fade;

    (1u32..)
        .take(count.saturating_sub(1))
        .map(|k| {
            let input = if k == 1 {
                "[0:v]".to_string()
            } else {
                format!("[v{}]", k - 1)
            };
            let offset = step * f64::from(k);
            format!("{input}[{k}:v]xfade=transition=fade:duration={fade}:offset={offset}[v{k}]")
        })
        .collect::<Vec<_>>()
        .join(";")
}
