//! Transcription pipeline
//!
//! Given a stored entry, run fetch -> transcribe -> translate and write
//! the result back in one terminal update. Strictly sequential, no
//! retries; a failed invocation lands the entry in `failed` and a new
//! trigger is required to try again.
//!
//! Vendors are interchangeable strategies behind `SpeechProvider`,
//! selected once at startup.

mod fetch;
mod openai;
mod provider;
mod runner;
mod sarvam;

pub use fetch::{AudioFetcher, FetchedAudio, HttpAudioFetcher};
pub use openai::OpenAiProvider;
pub use provider::{build_provider, SpeechProvider};
pub use runner::TranscriptionPipeline;
pub use sarvam::SarvamProvider;
