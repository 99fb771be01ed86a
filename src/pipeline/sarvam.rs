use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use super::provider::{check_status, SpeechProvider};
use crate::config::SarvamConfig;
use crate::error::ProviderError;

const STT_MODEL: &str = "saarika:v2";
const TRANSLATE_MODEL: &str = "mayura:v1";

/// Sarvam AI-backed provider: saarika for speech-to-text, mayura for
/// translation. Sarvam speaks locale-suffixed language codes (`mr-IN`).
#[derive(Debug)]
pub struct SarvamProvider {
    client: reqwest::Client,
    config: SarvamConfig,
}

impl SarvamProvider {
    pub fn new(client: reqwest::Client, config: SarvamConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

fn locale_code(code: &str) -> String {
    if code.contains('-') {
        code.to_string()
    } else {
        format!("{code}-IN")
    }
}

#[derive(Debug, Deserialize)]
struct SpeechToTextResponse {
    transcript: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

#[async_trait]
impl SpeechProvider for SarvamProvider {
    fn name(&self) -> &str {
        "sarvam"
    }

    async fn transcribe(
        &self,
        audio: &[u8],
        mime: &str,
        language: &str,
    ) -> Result<String, ProviderError> {
        let file = multipart::Part::bytes(audio.to_vec())
            .file_name("audio.webm")
            .mime_str(mime)?;

        let form = multipart::Form::new()
            .part("file", file)
            .text("model", STT_MODEL)
            .text("language_code", locale_code(language));

        let response = self
            .client
            .post(self.endpoint("/speech-to-text"))
            .header("api-subscription-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let body: SpeechToTextResponse = check_status(response).await?.json().await?;
        Ok(body.transcript)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let request = serde_json::json!({
            "input": text,
            "source_language_code": locale_code(source),
            "target_language_code": locale_code(target),
            "model": TRANSLATE_MODEL,
        });

        let response = self
            .client
            .post(self.endpoint("/translate"))
            .header("api-subscription-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let body: TranslateResponse = check_status(response).await?.json().await?;
        Ok(body.translated_text)
    }
}
