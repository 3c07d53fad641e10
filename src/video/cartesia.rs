//! Cartesia text-to-speech.

use std::{path::Path, time::Duration};

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::config::CartesiaConfig;

use super::{Result, check};

const API_VERSION: &str = "2025-04-16";
const SYNTHESIZE_TIMEOUT: Duration = Duration::from_secs(60);
const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// A voice offered by Cartesia.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `GET /voices` has returned both shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum VoiceList {
    Page { data: Vec<Voice> },
    Bare(Vec<Voice>),
}

impl VoiceList {
    fn into_voices(self) -> Vec<Voice> {
        match self {
            Self::Page { data } | Self::Bare(data) => data,
        }
    }
}

/// Text-to-speech into a WAV file.
pub trait SpeechVendor {
    /// Speak `transcript` and write the audio to `dest`.
    async fn synthesize(&self, transcript: &str, dest: &Path) -> Result<()>;
}

pub struct CartesiaClient {
    http: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    voice_id: String,
    speed: f32,
}

impl CartesiaClient {
    pub fn new(http: Client, api_key: SecretString, config: &CartesiaConfig) -> Self {
        Self {
            http,
            api_key,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            voice_id: config.voice_id.clone(),
            speed: config.speed,
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(self.api_key.expose_secret())
            .header("Cartesia-Version", API_VERSION)
    }

    /// Voices available to this account.
    pub async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self
            .request(self.http.get(format!("{}/voices", self.base_url)))
            .timeout(LIST_TIMEOUT)
            .send()
            .await?;

        let list: VoiceList = check("cartesia", response).await?.json().await?;
        Ok(list.into_voices())
    }
}

impl SpeechVendor for CartesiaClient {
    /// 44.1 kHz 16-bit PCM.
    async fn synthesize(&self, transcript: &str, dest: &Path) -> Result<()> {
        let body = json!({
            "model_id": self.model,
            "transcript": transcript,
            "voice": { "mode": "id", "id": self.voice_id },
            "language": "en",
            "output_format": {
                "container": "wav",
                "encoding": "pcm_s16le",
                "sample_rate": 44100,
            },
            "generation_config": { "speed": self.speed },
        });

        let response = self
            .request(self.http.post(format!("{}/tts/bytes", self.base_url)))
            .timeout(SYNTHESIZE_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let audio = check("cartesia", response).await?.bytes().await?;
        tokio::fs::write(dest, &audio).await?;
        tracing::info!(path = %dest.display(), bytes = audio.len(), "narration synthesized");
        Ok(())
    }
}
