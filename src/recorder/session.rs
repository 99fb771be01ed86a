use bytes::{Bytes, BytesMut};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::capture::{CaptureBackend, CaptureState};
use crate::error::CaptureError;

/// Container/codec tag for assembled recordings.
pub const AUDIO_MIME: &str = "audio/webm";

/// Recorder state. `Idle` is initial; `Stopped` is terminal until the
/// session is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Paused,
    Stopped,
}

/// Immutable assembled recording handed off to the save flow.
#[derive(Debug, Clone)]
pub struct AudioBlob {
    pub bytes: Bytes,
    pub mime: &'static str,
}

/// One record-to-stop cycle.
///
/// Owns the capture backend, the ordered chunk sequence, and the
/// elapsed-seconds counter. All commands are driven from a single caller;
/// the chunk collector is the only task writing to the sequence.
pub struct RecorderSession {
    backend: Box<dyn CaptureBackend>,
    state: RecorderState,
    elapsed_secs: Arc<AtomicU64>,
    chunks: Arc<Mutex<Vec<Bytes>>>,
    collector_handle: Option<JoinHandle<()>>,
    ticker_handle: Option<JoinHandle<()>>,
}

impl RecorderSession {
    pub fn new(backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            backend,
            state: RecorderState::Idle,
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            chunks: Arc::new(Mutex::new(Vec::new())),
            collector_handle: None,
            ticker_handle: None,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Seconds spent in `Recording` so far.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs.load(Ordering::SeqCst)
    }

    /// `Idle -> Recording`: acquire the device and begin accumulating
    /// chunks. On `DeviceUnavailable` the session stays `Idle`.
    pub async fn start(&mut self) -> Result<(), CaptureError> {
        if self.state != RecorderState::Idle {
            warn!("start ignored: recorder is {:?}", self.state);
            return Ok(());
        }

        let mut chunk_rx = self.backend.start().await?;

        info!("recording started via {}", self.backend.name());

        self.elapsed_secs.store(0, Ordering::SeqCst);

        // Collector appends chunks in emission order; it is the sequence's
        // only writer. Empty chunks are dropped.
        let chunks = Arc::clone(&self.chunks);
        self.collector_handle = Some(tokio::spawn(async move {
            while let Some(chunk) = chunk_rx.recv().await {
                if chunk.is_empty() {
                    continue;
                }
                let mut chunks = chunks.lock().await;
                chunks.push(chunk);
            }
        }));

        self.start_ticker();
        self.state = RecorderState::Recording;
        Ok(())
    }

    /// `Recording -> Paused`. No-op unless the capture handle reports it
    /// is actively recording.
    pub fn pause(&mut self) {
        if self.state != RecorderState::Recording
            || self.backend.state() != CaptureState::Recording
        {
            return;
        }
        self.backend.pause();
        self.stop_ticker();
        self.state = RecorderState::Paused;
    }

    /// `Paused -> Recording`. No-op unless the capture handle reports it
    /// is paused.
    pub fn resume(&mut self) {
        if self.state != RecorderState::Paused || self.backend.state() != CaptureState::Paused {
            return;
        }
        self.backend.resume();
        self.start_ticker();
        self.state = RecorderState::Recording;
    }

    /// `{Recording, Paused} -> Stopped`: finalize the capture handle,
    /// release the device, and assemble all chunks, in emission order and
    /// byte-exact, into a single blob. No-op (returns `None`) from `Idle`
    /// or `Stopped`.
    pub async fn stop(&mut self) -> Result<Option<AudioBlob>, CaptureError> {
        if !matches!(self.state, RecorderState::Recording | RecorderState::Paused) {
            return Ok(None);
        }

        self.stop_ticker();
        self.state = RecorderState::Stopped;

        self.backend.stop().await?;

        // The chunk channel closes after the backend delivers its last
        // buffered chunk; wait for the collector to drain it.
        if let Some(handle) = self.collector_handle.take() {
            let _ = handle.await;
        }

        let mut chunks = self.chunks.lock().await;
        let total: usize = chunks.iter().map(Bytes::len).sum();
        let mut buf = BytesMut::with_capacity(total);
        for chunk in chunks.drain(..) {
            buf.extend_from_slice(&chunk);
        }

        info!(
            "recording stopped: {} bytes after {}s",
            buf.len(),
            self.elapsed_secs()
        );

        Ok(Some(AudioBlob {
            bytes: buf.freeze(),
            mime: AUDIO_MIME,
        }))
    }

    /// Abandon the session: drop any accumulated audio and return to
    /// `Idle` with the counter reset. No persisted side effects.
    pub async fn discard(&mut self) {
        self.stop_ticker();
        if let Some(handle) = self.collector_handle.take() {
            handle.abort();
        }
        self.chunks.lock().await.clear();
        self.elapsed_secs.store(0, Ordering::SeqCst);
        self.state = RecorderState::Idle;
    }

    fn start_ticker(&mut self) {
        let elapsed = Arc::clone(&self.elapsed_secs);
        self.ticker_handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // First tick completes immediately; the counter starts at the
            // next whole second.
            interval.tick().await;
            loop {
                interval.tick().await;
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker_handle.take() {
            handle.abort();
        }
    }
}

impl Drop for RecorderSession {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker_handle.take() {
            handle.abort();
        }
        if let Some(handle) = self.collector_handle.take() {
            handle.abort();
        }
    }
}
