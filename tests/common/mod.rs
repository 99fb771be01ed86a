// Scripted collaborators shared by the pipeline and HTTP API tests.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};

use pravas::config::LanguageConfig;
use pravas::error::ProviderError;
use pravas::pipeline::{AudioFetcher, FetchedAudio, SpeechProvider};

pub fn test_languages() -> LanguageConfig {
    LanguageConfig {
        source: "mr".to_string(),
        target: "en".to_string(),
        source_name: "Marathi".to_string(),
        target_name: "English".to_string(),
    }
}

/// Provider that returns canned text, optionally failing a chosen stage,
/// and counts how often each stage was called.
#[derive(Debug)]
pub struct ScriptedProvider {
    pub fail_transcribe: bool,
    pub fail_translate: bool,
    pub transcribe_calls: AtomicUsize,
    pub translate_calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn ok() -> Self {
        Self {
            fail_transcribe: false,
            fail_translate: false,
            transcribe_calls: AtomicUsize::new(0),
            translate_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_transcribe() -> Self {
        Self {
            fail_transcribe: true,
            ..Self::ok()
        }
    }

    pub fn failing_translate() -> Self {
        Self {
            fail_translate: true,
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> (usize, usize) {
        (
            self.transcribe_calls.load(Ordering::SeqCst),
            self.translate_calls.load(Ordering::SeqCst),
        )
    }
}

#[async_trait]
impl SpeechProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn transcribe(
        &self,
        _audio: &[u8],
        _mime: &str,
        _language: &str,
    ) -> Result<String, ProviderError> {
        self.transcribe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_transcribe {
            return Err(ProviderError::Api {
                status: 503,
                body: "speech service unavailable".to_string(),
            });
        }
        Ok("आजचा दिवस छान होता".to_string())
    }

    async fn translate(
        &self,
        _text: &str,
        _source: &str,
        _target: &str,
    ) -> Result<String, ProviderError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_translate {
            return Err(ProviderError::InvalidResponse(
                "empty completion".to_string(),
            ));
        }
        Ok("Today was a lovely day".to_string())
    }
}

/// Fetcher that serves fixed bytes or refuses the connection.
pub struct ScriptedFetcher {
    pub fail: bool,
}

impl ScriptedFetcher {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn unreachable() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl AudioFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAudio> {
        if self.fail {
            anyhow::bail!("connection refused: {url}");
        }
        Ok(FetchedAudio {
            bytes: Bytes::from_static(b"fake-webm-audio"),
            content_type: Some("audio/webm".to_string()),
        })
    }
}
