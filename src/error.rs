//! Error types for the pravas service, one enum per layer.

use thiserror::Error;

use crate::model::TranscriptionStatus;

/// Errors surfaced by a capture backend.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// No input device exists or microphone permission was denied.
    #[error("no audio input device available or permission denied")]
    DeviceUnavailable,

    #[error("capture backend error: {0}")]
    Backend(String),
}

/// Errors from the entry/trip store (the external database seam).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// Rejected status write. Transitions are monotonic along
    /// pending -> processing -> {done | failed}.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: TranscriptionStatus,
        to: TranscriptionStatus,
    },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors from the object storage service.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("upload rejected: {0}")]
    Upload(String),

    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Errors from an external speech/translation provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the provider API.
    #[error("provider returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),
}

/// Errors from the post-stop save flow.
#[derive(Error, Debug)]
pub enum SaveError {
    /// Save attempted without a signed-in user. Checked before any upload
    /// so a failed save never orphans a stored object.
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("trip title must not be empty")]
    EmptyTripTitle,

    /// Another save for this session is still in flight.
    #[error("a save is already in progress")]
    SaveInProgress,

    #[error("failed to create trip: {0}")]
    TripCreateFailed(#[source] StoreError),

    #[error("failed to upload audio: {0}")]
    UploadFailed(#[source] StorageError),

    #[error("failed to create entry: {0}")]
    EntryCreateFailed(#[source] StoreError),
}

/// A failure in one of the pipeline's upstream calls. The variant names
/// the stage that failed; the rendered message is what gets persisted
/// into `transcription_error`.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("audio fetch failed: {0}")]
    Fetch(String),

    #[error("transcription failed: {0}")]
    Transcribe(#[source] ProviderError),

    #[error("translation failed: {0}")]
    Translate(#[source] ProviderError),
}

/// Terminal outcome of a pipeline invocation that did not reach `done`.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("entry not found")]
    NotFound,

    /// Lost the compare-and-set: another invocation holds the entry.
    #[error("entry is already being processed")]
    AlreadyProcessing,

    /// The entry already reached `done`; it is never reprocessed.
    #[error("entry is already transcribed")]
    AlreadyDone,

    /// Fetch/transcribe/translate failed; the entry was marked `failed`.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The terminal status write itself failed. Unexpected in normal
    /// operation; propagates to the caller unhandled.
    #[error("store update failed: {0}")]
    Store(#[from] StoreError),
}
