use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::CaptureError;

/// Sub-state reported by the capture handle itself.
///
/// Pause/resume commands are gated on this, not on the session's own
/// state, so a handle that silently dropped out of recording turns them
/// into no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Inactive,
    Recording,
    Paused,
}

/// Microphone capture backend.
///
/// Implementations hold the exclusive device handle and emit encoded
/// container chunks in production order. Real capture lives in the
/// embedding client; tests use a scripted backend.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Acquire the device and start emitting chunks.
    ///
    /// Returns the chunk receiver. Fails with
    /// `CaptureError::DeviceUnavailable` when permission is denied or no
    /// input device exists.
    async fn start(&mut self) -> Result<mpsc::Receiver<Bytes>, CaptureError>;

    /// Suspend chunk production. Ignored unless actively recording.
    fn pause(&mut self);

    /// Resume chunk production. Ignored unless paused.
    fn resume(&mut self);

    /// Finalize the stream and release the device. The chunk channel
    /// closes once the last buffered chunk has been delivered.
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Current device sub-state.
    fn state(&self) -> CaptureState;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
