use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;

/// Raw audio pulled from an entry's `audio_url`.
#[derive(Debug, Clone)]
pub struct FetchedAudio {
    pub bytes: Bytes,
    /// Content type reported by the storage service, if any.
    pub content_type: Option<String>,
}

/// Fetches the audio an entry points at. Split out from the pipeline so
/// tests can script fetch failures without a network.
#[async_trait]
pub trait AudioFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio>;
}

pub struct HttpAudioFetcher {
    client: reqwest::Client,
}

impl HttpAudioFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch audio from {url}"))?
            .error_for_status()
            .with_context(|| format!("Audio URL {url} returned an error status"))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .context("Failed to read audio response body")?;

        Ok(FetchedAudio {
            bytes,
            content_type,
        })
    }
}
