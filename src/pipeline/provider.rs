use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::{OpenAiProvider, SarvamProvider};
use crate::config::{LanguageConfig, ProviderConfig};
use crate::error::ProviderError;

/// An external speech-to-text + translation vendor.
///
/// The pipeline never branches on vendor name; everything it needs is
/// behind this contract.
#[async_trait]
pub trait SpeechProvider: Send + Sync + std::fmt::Debug {
    /// Vendor tag persisted into `transcription_provider`.
    fn name(&self) -> &str;

    /// Speech-to-text for audio spoken in `language` (ISO 639-1).
    async fn transcribe(
        &self,
        audio: &[u8],
        mime: &str,
        language: &str,
    ) -> Result<String, ProviderError>;

    /// Translate `text` from `source` to `target`, preserving tone and
    /// nuance.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;
}

/// Build the configured provider. Selection happens here, once, at
/// startup; the rest of the system sees only the trait.
pub fn build_provider(
    client: reqwest::Client,
    config: &ProviderConfig,
    languages: &LanguageConfig,
) -> Result<Arc<dyn SpeechProvider>> {
    match config.default.as_str() {
        "openai" => {
            let openai = config
                .openai
                .clone()
                .context("providers.openai section missing")?;
            Ok(Arc::new(OpenAiProvider::new(client, openai, languages)))
        }
        "sarvam" => {
            let sarvam = config
                .sarvam
                .clone()
                .context("providers.sarvam section missing")?;
            Ok(Arc::new(SarvamProvider::new(client, sarvam)))
        }
        other => anyhow::bail!("unknown speech provider: {other}"),
    }
}

/// Map a non-success provider response to `ProviderError::Api`.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Api {
        status: status.as_u16(),
        body,
    })
}
