// Integration tests for the transcription pipeline
//
// In-memory store plus scripted provider/fetcher; these verify the
// terminal-state contract, the compare-and-set claim, and that the
// persisted entry carries the authoritative outcome.

mod common;

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use common::{test_languages, ScriptedFetcher, ScriptedProvider};
use pravas::error::PipelineError;
use pravas::model::{Entry, EntryStore, MemoryStore, TranscriptionStatus};
use pravas::pipeline::TranscriptionPipeline;

fn seeded_entry() -> Entry {
    Entry::new(
        Uuid::new_v4(),
        "https://storage.example/u1/rec.webm",
        "audio/webm",
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(),
        Uuid::new_v4(),
    )
}

struct Harness {
    store: Arc<MemoryStore>,
    provider: Arc<ScriptedProvider>,
    pipeline: TranscriptionPipeline,
}

fn harness(provider: ScriptedProvider, fetcher: ScriptedFetcher) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let provider = Arc::new(provider);
    let pipeline = TranscriptionPipeline::new(
        store.clone() as Arc<dyn EntryStore>,
        Arc::new(fetcher),
        provider.clone(),
        test_languages(),
    );
    Harness {
        store,
        provider,
        pipeline,
    }
}

#[tokio::test]
async fn successful_run_lands_entry_in_done() -> Result<()> {
    let h = harness(ScriptedProvider::ok(), ScriptedFetcher::ok());
    let entry = h.store.insert_entry(seeded_entry()).await?;

    let finished = h.pipeline.run(entry.id).await.expect("pipeline success");

    assert_eq!(finished.transcription_status, TranscriptionStatus::Done);
    assert!(finished.transcript_mr.is_some());
    assert!(finished.transcript_en.is_some());
    assert_eq!(finished.transcription_provider.as_deref(), Some("scripted"));
    assert!(finished.transcription_error.is_none());

    // The persisted row matches the returned value.
    let stored = h.store.get_entry(entry.id).await?;
    assert_eq!(stored.transcription_status, TranscriptionStatus::Done);
    assert_eq!(stored.transcript_en, finished.transcript_en);
    Ok(())
}

#[tokio::test]
async fn unreachable_audio_marks_entry_failed() -> Result<()> {
    let h = harness(ScriptedProvider::ok(), ScriptedFetcher::unreachable());
    let entry = h.store.insert_entry(seeded_entry()).await?;

    let err = h.pipeline.run(entry.id).await.expect_err("fetch must fail");
    assert!(matches!(err, PipelineError::Upstream(_)));

    let stored = h.store.get_entry(entry.id).await?;
    assert_eq!(stored.transcription_status, TranscriptionStatus::Failed);
    let detail = stored.transcription_error.expect("error detail persisted");
    assert!(detail.contains("audio fetch failed"), "got: {detail}");
    assert!(stored.transcript_mr.is_none());
    assert!(stored.transcript_en.is_none());

    // Transcription was never attempted.
    assert_eq!(h.provider.calls(), (0, 0));
    Ok(())
}

#[tokio::test]
async fn transcribe_failure_marks_entry_failed() -> Result<()> {
    let h = harness(ScriptedProvider::failing_transcribe(), ScriptedFetcher::ok());
    let entry = h.store.insert_entry(seeded_entry()).await?;

    h.pipeline.run(entry.id).await.expect_err("must fail");

    let stored = h.store.get_entry(entry.id).await?;
    assert_eq!(stored.transcription_status, TranscriptionStatus::Failed);
    assert!(stored
        .transcription_error
        .as_deref()
        .unwrap_or_default()
        .contains("transcription failed"));

    // Translation is never reached after a transcription failure.
    assert_eq!(h.provider.calls(), (1, 0));
    Ok(())
}

#[tokio::test]
async fn translate_failure_marks_entry_failed() -> Result<()> {
    let h = harness(ScriptedProvider::failing_translate(), ScriptedFetcher::ok());
    let entry = h.store.insert_entry(seeded_entry()).await?;

    h.pipeline.run(entry.id).await.expect_err("must fail");

    let stored = h.store.get_entry(entry.id).await?;
    assert_eq!(stored.transcription_status, TranscriptionStatus::Failed);
    assert!(stored
        .transcription_error
        .as_deref()
        .unwrap_or_default()
        .contains("translation failed"));
    assert_eq!(h.provider.calls(), (1, 1));
    Ok(())
}

#[tokio::test]
async fn unknown_entry_writes_nothing() {
    let h = harness(ScriptedProvider::ok(), ScriptedFetcher::ok());

    let err = h.pipeline.run(Uuid::new_v4()).await.expect_err("no entry");

    assert!(matches!(err, PipelineError::NotFound));
    assert_eq!(h.provider.calls(), (0, 0));
}

#[tokio::test]
async fn duplicate_trigger_loses_the_claim() -> Result<()> {
    let h = harness(ScriptedProvider::ok(), ScriptedFetcher::ok());
    let entry = h.store.insert_entry(seeded_entry()).await?;

    // First trigger already claimed the entry.
    h.store.begin_processing(entry.id).await?;

    let err = h.pipeline.run(entry.id).await.expect_err("claim lost");
    assert!(matches!(err, PipelineError::AlreadyProcessing));

    // The loser touched neither the row nor the providers.
    let stored = h.store.get_entry(entry.id).await?;
    assert_eq!(stored.transcription_status, TranscriptionStatus::Processing);
    assert_eq!(h.provider.calls(), (0, 0));
    Ok(())
}

#[tokio::test]
async fn done_entry_is_never_reprocessed() -> Result<()> {
    let h = harness(ScriptedProvider::ok(), ScriptedFetcher::ok());
    let entry = h.store.insert_entry(seeded_entry()).await?;

    h.pipeline.run(entry.id).await.expect("first run succeeds");
    let err = h.pipeline.run(entry.id).await.expect_err("terminal");

    assert!(matches!(err, PipelineError::AlreadyDone));
    assert_eq!(h.provider.calls(), (1, 1));
    Ok(())
}

#[tokio::test]
async fn failed_entry_can_be_retriggered() -> Result<()> {
    let failing = harness(ScriptedProvider::ok(), ScriptedFetcher::unreachable());
    let entry = failing.store.insert_entry(seeded_entry()).await?;

    failing.pipeline.run(entry.id).await.expect_err("first run fails");
    assert_eq!(
        failing.store.get_entry(entry.id).await?.transcription_status,
        TranscriptionStatus::Failed
    );

    // External re-trigger against the same store, this time reachable.
    let retry_pipeline = TranscriptionPipeline::new(
        failing.store.clone() as Arc<dyn EntryStore>,
        Arc::new(ScriptedFetcher::ok()),
        Arc::new(ScriptedProvider::ok()),
        test_languages(),
    );

    let finished = retry_pipeline.run(entry.id).await.expect("retry succeeds");
    assert_eq!(finished.transcription_status, TranscriptionStatus::Done);
    assert!(finished.transcription_error.is_none());
    Ok(())
}
