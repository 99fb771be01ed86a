use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::fetch::AudioFetcher;
use super::provider::SpeechProvider;
use crate::config::LanguageConfig;
use crate::error::{PipelineError, StoreError, UpstreamError};
use crate::model::{Entry, EntryStore, TranscriptionStatus};

/// The sequential fetch -> transcribe -> translate -> persist operation.
///
/// Constructed once at startup with its collaborators injected; each
/// `run` is an independent, stateless invocation. The persisted entry is
/// the authoritative outcome; the returned value is a best-effort signal
/// for the synchronous caller.
pub struct TranscriptionPipeline {
    store: Arc<dyn EntryStore>,
    fetcher: Arc<dyn AudioFetcher>,
    provider: Arc<dyn SpeechProvider>,
    languages: LanguageConfig,
}

impl TranscriptionPipeline {
    pub fn new(
        store: Arc<dyn EntryStore>,
        fetcher: Arc<dyn AudioFetcher>,
        provider: Arc<dyn SpeechProvider>,
        languages: LanguageConfig,
    ) -> Self {
        Self {
            store,
            fetcher,
            provider,
            languages,
        }
    }

    /// Run the pipeline for one entry.
    ///
    /// The entry is claimed with a compare-and-set from `{pending,
    /// failed}` to `processing`; a duplicate trigger loses the claim and
    /// returns without touching the row or calling any provider. On
    /// upstream failure the entry is marked `failed` (with the rendered
    /// cause) before the error is returned.
    pub async fn run(&self, entry_id: Uuid) -> Result<Entry, PipelineError> {
        let entry = self
            .store
            .begin_processing(entry_id)
            .await
            .map_err(claim_error)?;

        info!(
            "processing entry {} via {} ({} -> {})",
            entry_id,
            self.provider.name(),
            self.languages.source,
            self.languages.target
        );

        match self.transcribe_and_translate(&entry).await {
            Ok((source_text, target_text)) => {
                let entry = self
                    .store
                    .complete_entry(entry_id, &source_text, &target_text, self.provider.name())
                    .await?;
                info!("entry {} done", entry_id);
                Ok(entry)
            }
            Err(upstream) => {
                error!("entry {} failed: {}", entry_id, upstream);
                self.store
                    .fail_entry(entry_id, &upstream.to_string())
                    .await?;
                Err(PipelineError::Upstream(upstream))
            }
        }
    }

    async fn transcribe_and_translate(
        &self,
        entry: &Entry,
    ) -> Result<(String, String), UpstreamError> {
        let audio = self
            .fetcher
            .fetch(&entry.audio_url)
            .await
            .map_err(|e| UpstreamError::Fetch(e.to_string()))?;

        let mime = audio
            .content_type
            .as_deref()
            .unwrap_or(entry.audio_mime.as_str());

        let source_text = self
            .provider
            .transcribe(&audio.bytes, mime, &self.languages.source)
            .await
            .map_err(UpstreamError::Transcribe)?;

        let target_text = self
            .provider
            .translate(&source_text, &self.languages.source, &self.languages.target)
            .await
            .map_err(UpstreamError::Translate)?;

        Ok((source_text, target_text))
    }
}

fn claim_error(err: StoreError) -> PipelineError {
    match err {
        StoreError::NotFound => PipelineError::NotFound,
        StoreError::InvalidTransition {
            from: TranscriptionStatus::Done,
            ..
        } => PipelineError::AlreadyDone,
        StoreError::InvalidTransition {
            from: TranscriptionStatus::Processing,
            ..
        } => PipelineError::AlreadyProcessing,
        other => PipelineError::Store(other),
    }
}
