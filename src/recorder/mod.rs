//! Recorder state machine
//!
//! This module provides the client-side recording session:
//! - `CaptureBackend` - the microphone capture seam
//! - `RecorderSession` - record/pause/resume/stop transitions, ordered
//!   chunk accumulation, and the elapsed-seconds counter

mod capture;
mod session;

pub use capture::{CaptureBackend, CaptureState};
pub use session::{AudioBlob, RecorderSession, RecorderState, AUDIO_MIME};
