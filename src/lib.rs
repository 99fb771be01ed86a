pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod recorder;
pub mod save;
pub mod storage;

pub use auth::Identity;
pub use config::Config;
pub use error::{
    CaptureError, PipelineError, ProviderError, SaveError, StorageError, StoreError, UpstreamError,
};
pub use http::{create_router, AppState};
pub use model::{Entry, EntryStore, MemoryStore, TranscriptionStatus, Trip};
pub use pipeline::{
    build_provider, AudioFetcher, FetchedAudio, HttpAudioFetcher, OpenAiProvider, SarvamProvider,
    SpeechProvider, TranscriptionPipeline,
};
pub use recorder::{AudioBlob, CaptureBackend, CaptureState, RecorderSession, RecorderState};
pub use save::SaveFlow;
pub use storage::{HttpObjectStore, MemoryObjectStore, ObjectStore};
