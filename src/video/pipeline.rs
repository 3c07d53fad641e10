//! Post + style in, finished video out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use jiff::Zoned;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::content;
use crate::model::{
    GenerationReport, NarrationMode, PostContent, VideoArtifact, VideoRequest, VideoStyle,
};

use super::cartesia::{CartesiaClient, SpeechVendor};
use super::ffmpeg::Ffmpeg;
use super::runway::{PollOutcome, RunwayClient, VideoVendor, poll_task};
use super::styles::{find_style, load_styles, render_prompt, voice_script};
use super::{Result, VideoError, VideoPaths};

/// Drives one or more vendor jobs and assembles the result.
///
/// Runway renders video and Cartesia speaks narration unless other vendors
/// are plugged in.
pub struct VideoGenerator<V = RunwayClient, S = CartesiaClient> {
    paths: VideoPaths,
    styles: Vec<VideoStyle>,
    video: Option<V>,
    speech: Option<S>,
    ffmpeg: Ffmpeg,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl VideoGenerator {
    /// Set up for the project at `root`. Vendors without an API key are left out.
    pub fn new(config: &Config, root: &Path) -> Result<Self> {
        let http = Client::new();

        let runway = config
            .runway_api_key
            .as_ref()
            .map(|key| RunwayClient::new(http.clone(), reissue(key), &config.runway));
        let cartesia = config
            .cartesia_api_key
            .as_ref()
            .map(|key| CartesiaClient::new(http.clone(), reissue(key), &config.cartesia));

        Self::with_vendors(config, root, runway, cartesia)
    }

    /// The speech client, when `CARTESIA_API_KEY` is set.
    pub fn cartesia(&self) -> Result<&CartesiaClient> {
        self.speech
            .as_ref()
            .ok_or(VideoError::MissingApiKey("CARTESIA_API_KEY"))
    }
}

impl<V: VideoVendor, S: SpeechVendor> VideoGenerator<V, S> {
    /// Set up with explicit vendors. `None` leaves that vendor out.
    fn with_vendors(
        config: &Config,
        root: &Path,
        video: Option<V>,
        speech: Option<S>,
    ) -> Result<Self> {
        let paths = VideoPaths::for_root(root);
        let styles = load_styles(&paths.prompts_dir)?;

        Ok(Self {
            paths,
            styles,
            video,
            speech,
            ffmpeg: Ffmpeg::new(config.ffmpeg.clone()),
            poll_interval: Duration::from_secs(config.runway.poll_interval_secs),
            max_poll_attempts: config.runway.max_poll_attempts,
        })
    }

    pub fn styles(&self) -> &[VideoStyle] {
        &self.styles
    }

    /// Produce one finished video for `request`.
    ///
    /// Vendor failures never abort the run: they leave a placeholder in place
    /// of the clip. Only an unknown style or local I/O errors are returned.
    pub async fn generate(&self, request: &VideoRequest) -> Result<GenerationReport> {
        let style = find_style(&self.styles, &request.style)?;
        let post = self.post_content(&request.post_id);
        let prompt = render_prompt(style, &post);
        self.paths.ensure()?;

        let timestamp = Zoned::now().strftime("%Y%m%d_%H%M%S").to_string();
        let base = format!("{}_{}_{timestamp}", request.post_id, style.key);
        let clips = request.chain.max(1);
        tracing::info!(post = %request.post_id, style = %style.key, clips, "generating video");

        let raw = self.paths.videos_dir.join(format!("{base}_raw.mp4"));
        let video = if clips > 1 {
            self.render_chain(&prompt, clips, request.duration, &base, &raw)
                .await?
        } else {
            self.render_clip(&prompt, None, request.duration, &raw)
                .await?
        };

        let final_path = self
            .paths
            .final_dir
            .join(format!("{base}_{}.mp4", request.narration.suffix()));
        match request.narration {
            NarrationMode::Voice => {
                let script = voice_script(style, &post);
                self.narrate(&script, &video, &base, &final_path).await?;
            }
            NarrationMode::Silent => {
                tokio::fs::copy(video.path(), &final_path).await?;
            }
        }
        tracing::info!(path = %final_path.display(), rendered = video.is_rendered(), "video saved");

        Ok(GenerationReport {
            post_id: request.post_id.clone(),
            style: style.key.clone(),
            narration: request.narration,
            clips,
            video_path: final_path,
            rendered: video.is_rendered(),
            prompt,
            timestamp,
            cost_estimate: GenerationReport::estimate_cost(&style.key, clips),
        })
    }

    /// The post's content, or the built-in sample when no file matches.
    fn post_content(&self, post_id: &str) -> PostContent {
        let Some(path) = content::find_post_file(&self.paths.posts_dir, post_id) else {
            tracing::warn!(post = post_id, "post not found, using sample content");
            return PostContent::sample(post_id);
        };

        match content::read_post_lenient(&path) {
            Ok(post) => {
                let mut content = PostContent::from_post(&post);
                content.id = post_id.to_string();
                content
            }
            Err(e) => {
                tracing::warn!(post = post_id, "{e}; using sample content");
                PostContent::sample(post_id)
            }
        }
    }

    /// Render a single clip to `dest`, seeded with `image` when given.
    async fn render_clip(
        &self,
        prompt: &str,
        image: Option<&str>,
        duration: u32,
        dest: &Path,
    ) -> Result<VideoArtifact> {
        let Some(vendor) = &self.video else {
            tracing::warn!("RUNWAY_API_KEY not set, writing placeholder");
            return placeholder(prompt, dest, "RUNWAY_API_KEY is not set (demo mode)").await;
        };

        match self.run_job(vendor, prompt, image, duration, dest).await {
            Ok(()) => Ok(VideoArtifact::Rendered(dest.to_path_buf())),
            Err(e) => {
                tracing::warn!("video generation failed: {e}");
                placeholder(prompt, dest, &e.to_string()).await
            }
        }
    }

    async fn run_job(
        &self,
        vendor: &V,
        prompt: &str,
        image: Option<&str>,
        duration: u32,
        dest: &Path,
    ) -> Result<()> {
        let id = match image {
            Some(image) => vendor.image_to_video(image, prompt, duration).await?,
            None => vendor.text_to_video(prompt, duration).await?,
        };

        match poll_task(vendor, &id, self.poll_interval, self.max_poll_attempts).await {
            PollOutcome::Succeeded { output } => {
                let url = output.first().ok_or_else(|| VideoError::NoOutput(id.clone()))?;
                vendor.download(url, dest).await
            }
            PollOutcome::Failed { reason } => Err(VideoError::TaskFailed { id, reason }),
            PollOutcome::TimedOut { attempts } => Err(VideoError::TaskTimedOut { id, attempts }),
        }
    }

    /// Render `count` clips, each seeded with the last frame of the one before,
    /// and crossfade them into `raw`.
    async fn render_chain(
        &self,
        prompt: &str,
        count: u32,
        duration: u32,
        base: &str,
        raw: &Path,
    ) -> Result<VideoArtifact> {
        let mut rendered: Vec<PathBuf> = Vec::new();
        let mut seed: Option<String> = None;

        for n in 1..=count {
            let clip_path = self.paths.videos_dir.join(format!("{base}_clip{n:02}.mp4"));
            let clip = self
                .render_clip(prompt, seed.as_deref(), duration, &clip_path)
                .await?;
            tracing::info!(clip = n, of = count, rendered = clip.is_rendered(), "chain clip done");

            seed = None;
            if let VideoArtifact::Rendered(path) = clip {
                if n < count {
                    seed = self.last_frame_uri(&path).await;
                }
                rendered.push(path);
            }
        }

        match rendered.as_slice() {
            [] => placeholder(prompt, raw, "no clip in the chain was rendered").await,
            [only] => {
                tokio::fs::copy(only, raw).await?;
                Ok(VideoArtifact::Rendered(raw.to_path_buf()))
            }
            [first, ..] => {
                if let Err(e) = self.ffmpeg.concat_crossfade(&rendered, duration, raw).await {
                    tracing::warn!("crossfade failed, keeping first clip: {e}");
                    tokio::fs::copy(first, raw).await?;
                }
                Ok(VideoArtifact::Rendered(raw.to_path_buf()))
            }
        }
    }

    /// Last frame of `clip` as a PNG data URI. `None` falls back to text-to-video.
    async fn last_frame_uri(&self, clip: &Path) -> Option<String> {
        let png = clip.with_extension("last.png");
        if let Err(e) = self.ffmpeg.extract_last_frame(clip, &png).await {
            tracing::warn!(clip = %clip.display(), "frame extraction failed: {e}");
            return None;
        }
        match tokio::fs::read(&png).await {
            Ok(bytes) => Some(format!("data:image/png;base64,{}", STANDARD.encode(bytes))),
            Err(e) => {
                tracing::warn!(frame = %png.display(), "could not read frame: {e}");
                None
            }
        }
    }

    /// Synthesize narration and lay it under `video` at `final_path`.
    ///
    /// Falls back to a plain copy when narration can't be produced or merged.
    async fn narrate(
        &self,
        script: &str,
        video: &VideoArtifact,
        base: &str,
        final_path: &Path,
    ) -> Result<()> {
        let audio = match &self.speech {
            None => {
                tracing::warn!(script, "CARTESIA_API_KEY not set, skipping narration");
                None
            }
            Some(speech) => {
                let audio = self.paths.audio_dir.join(format!("{base}.wav"));
                match speech.synthesize(script, &audio).await {
                    Ok(()) => Some(audio),
                    Err(e) => {
                        tracing::warn!("narration failed: {e}");
                        None
                    }
                }
            }
        };

        if let (Some(audio), VideoArtifact::Rendered(clip)) = (&audio, video) {
            match self.ffmpeg.merge_audio(clip, audio, final_path).await {
                Ok(()) => return Ok(()),
                Err(e) => tracing::warn!("merge failed, keeping silent video: {e}"),
            }
        }

        tokio::fs::copy(video.path(), final_path).await?;
        Ok(())
    }
}

/// Each vendor client owns its own copy of the key.
fn reissue(key: &SecretString) -> SecretString {
    SecretString::from(key.expose_secret().to_owned())
}

/// Write a text file standing in for a clip that couldn't be rendered.
async fn placeholder(prompt: &str, dest: &Path, reason: &str) -> Result<VideoArtifact> {
    let text = format!(
        "PLACEHOLDER: no video was rendered\n\
         Reason: {reason}\n\n\
         Prompt:\n{prompt}\n\n\
         Set RUNWAY_API_KEY (in the environment or .env) to render real clips.\n\
         Generated: {}\n",
        Zoned::now()
    );
    tokio::fs::write(dest, text).await?;
    tracing::info!(path = %dest.display(), "placeholder written");
    Ok(VideoArtifact::Placeholder(dest.to_path_buf()))
}
