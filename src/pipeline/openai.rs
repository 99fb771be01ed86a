use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;
use std::collections::HashMap;

use super::provider::{check_status, SpeechProvider};
use crate::config::{LanguageConfig, OpenAiConfig};
use crate::error::ProviderError;

/// OpenAI-backed provider: Whisper for speech-to-text, a chat completion
/// for translation.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
    /// ISO code -> English language name, for the translator prompt.
    language_names: HashMap<String, String>,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, config: OpenAiConfig, languages: &LanguageConfig) -> Self {
        let mut language_names = HashMap::new();
        language_names.insert(languages.source.clone(), languages.source_name.clone());
        language_names.insert(languages.target.clone(), languages.target_name.clone());

        Self {
            client,
            config,
            language_names,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn language_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.language_names
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl SpeechProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
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
            .text("model", self.config.transcription_model.clone())
            .text("language", language.to_string());

        let response = self
            .client
            .post(self.endpoint("/v1/audio/transcriptions"))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let body: TranscriptionResponse = check_status(response).await?.json().await?;
        Ok(body.text)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let system = format!(
            "You are a helpful translator. Translate the following {} text to {}. \
             Preserve the tone and nuance.",
            self.language_name(source),
            self.language_name(target)
        );

        let request = serde_json::json!({
            "model": self.config.translation_model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": text },
            ],
        });

        let response = self
            .client
            .post(self.endpoint("/v1/chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let body: ChatResponse = check_status(response).await?.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("chat completion returned no content".to_string())
            })
    }
}
