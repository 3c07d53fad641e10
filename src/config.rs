//! Handraiser configuration.
//!
//! Loaded from `~/.handraiser/config.toml` when present; every key has a default,
//! so a missing file is not an error. Vendor API keys never live in the file:
//! they come from the environment (a `.env` in the working directory is honored).

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

/// Handraiser configuration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Directory holding `posts/`, `videos/`, and `tracking/`.
    /// The current directory when unset.
    pub project_root: Option<PathBuf>,

    /// Page opened after a post is copied to the clipboard.
    pub linkedin_url: String,

    /// Media tool used to merge, chain, and grab frames.
    pub ffmpeg: PathBuf,

    pub runway: RunwayConfig,

    pub cartesia: CartesiaConfig,

    /// `RUNWAY_API_KEY`. Absent means demo mode for video generation.
    #[serde(skip)]
    pub runway_api_key: Option<SecretString>,

    /// `CARTESIA_API_KEY`. Absent means narration is skipped.
    #[serde(skip)]
    pub cartesia_api_key: Option<SecretString>,
}

/// Video vendor settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RunwayConfig {
    pub api_url: String,
    pub model: String,
    pub ratio: String,
    /// Seconds between task status checks.
    pub poll_interval_secs: u64,
    /// Status checks before a task is abandoned.
    pub max_poll_attempts: u32,
}

/// Speech vendor settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CartesiaConfig {
    pub api_url: String,
    pub model: String,
    pub voice_id: String,
    pub speed: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: None,
            linkedin_url: "https://www.linkedin.com/feed/".to_string(),
            ffmpeg: PathBuf::from("ffmpeg"),
            runway: RunwayConfig::default(),
            cartesia: CartesiaConfig::default(),
            runway_api_key: None,
            cartesia_api_key: None,
        }
    }
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.dev.runwayml.com".to_string(),
            model: "gen3a_turbo".to_string(),
            ratio: "1280:720".to_string(),
            poll_interval_secs: 5,
            max_poll_attempts: 60,
        }
    }
}

impl Default for CartesiaConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.cartesia.ai".to_string(),
            model: "sonic-3".to_string(),
            voice_id: "a0e99841-438c-4a64-b679-ae501e7d6091".to_string(),
            speed: 1.0,
        }
    }
}

impl Config {
    /// Load config from `~/.handraiser/config.toml` and the environment.
    ///
    /// Returns an error only if the file exists but cannot be read or parsed,
    /// or if `CARTESIA_SPEED` is set to something that isn't a number.
    pub fn load() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let mut config = match Self::path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// The config file path: `~/.handraiser/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".handraiser").join("config.toml"))
    }

    /// Parse a config file, falling back to defaults when it doesn't exist.
    fn from_file(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn apply_env(&mut self) -> Result<(), String> {
        self.runway_api_key = non_empty_var("RUNWAY_API_KEY").map(SecretString::from);
        self.cartesia_api_key = non_empty_var("CARTESIA_API_KEY").map(SecretString::from);

        if let Some(voice) = non_empty_var("CARTESIA_VOICE_ID") {
            self.cartesia.voice_id = voice;
        }
        if let Some(speed) = non_empty_var("CARTESIA_SPEED") {
            self.cartesia.speed = speed
                .parse()
                .map_err(|e| format!("CARTESIA_SPEED must be a number: {e}"))?;
        }
        Ok(())
    }

    /// Resolve the project root: explicit override, then config, then `.`.
    pub fn project_root(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.project_root.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
