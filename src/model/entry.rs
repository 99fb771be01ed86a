use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::StoreError;

/// Lifecycle of an entry's transcription.
///
/// Transitions move along `pending -> processing -> {done | failed}`.
/// `done` is terminal; `failed` may re-enter `processing` on an external
/// re-trigger. Nothing else is a legal write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionStatus {
    Pending,
    Processing,
    Done,
    Failed,
}

impl TranscriptionStatus {
    pub fn can_transition_to(self, next: Self) -> bool {
        use TranscriptionStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Failed, Processing)
                | (Processing, Done)
                | (Processing, Failed)
        )
    }
}

impl fmt::Display for TranscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TranscriptionStatus::Pending => "pending",
            TranscriptionStatus::Processing => "processing",
            TranscriptionStatus::Done => "done",
            TranscriptionStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One voice-memo record.
///
/// Field invariants, enforced by the transition methods below so every
/// store implementation applies the same rules:
/// - both transcripts are non-null iff status is `done`;
/// - `transcription_error` is non-null only while status is `failed`;
/// - `pending`/`processing` carry no transcripts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub audio_url: String,
    pub audio_mime: String,
    /// Calendar date the entry represents, in the user's local context.
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub transcription_status: TranscriptionStatus,
    /// Transcript in the source language.
    pub transcript_mr: Option<String>,
    /// Transcript translated to the target language.
    pub transcript_en: Option<String>,
    pub transcription_provider: Option<String>,
    pub transcription_error: Option<String>,
}

impl Entry {
    pub fn new(
        trip_id: Uuid,
        audio_url: impl Into<String>,
        audio_mime: impl Into<String>,
        entry_date: NaiveDate,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            audio_url: audio_url.into(),
            audio_mime: audio_mime.into(),
            entry_date,
            created_at: Utc::now(),
            created_by,
            transcription_status: TranscriptionStatus::Pending,
            transcript_mr: None,
            transcript_en: None,
            transcription_provider: None,
            transcription_error: None,
        }
    }

    fn transition(&mut self, next: TranscriptionStatus) -> Result<(), StoreError> {
        let from = self.transcription_status;
        if !from.can_transition_to(next) {
            return Err(StoreError::InvalidTransition { from, to: next });
        }
        self.transcription_status = next;
        Ok(())
    }

    /// Move into `processing`. Clears any error detail left by a previous
    /// failed attempt so the `failed => error present` invariant holds.
    pub fn begin_processing(&mut self) -> Result<(), StoreError> {
        self.transition(TranscriptionStatus::Processing)?;
        self.transcription_error = None;
        Ok(())
    }

    /// Terminal success: both transcripts and the provider tag land in the
    /// same write as the status.
    pub fn complete(
        &mut self,
        transcript_source: impl Into<String>,
        transcript_target: impl Into<String>,
        provider: impl Into<String>,
    ) -> Result<(), StoreError> {
        self.transition(TranscriptionStatus::Done)?;
        self.transcript_mr = Some(transcript_source.into());
        self.transcript_en = Some(transcript_target.into());
        self.transcription_provider = Some(provider.into());
        Ok(())
    }

    /// Terminal failure for this invocation: the human-readable cause is
    /// persisted alongside the status.
    pub fn fail(&mut self, detail: impl Into<String>) -> Result<(), StoreError> {
        self.transition(TranscriptionStatus::Failed)?;
        self.transcription_error = Some(detail.into());
        Ok(())
    }
}
