//! Post-stop commit flow: attach a finished recording to a trip.
//!
//! Upload the blob to object storage under a per-user, per-save key, then
//! create the entry row in status `pending`. Discarding instead of saving
//! is `RecorderSession::discard` and touches nothing persistent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;
use tracing::info;
use uuid::Uuid;

use crate::auth::Identity;
use crate::error::SaveError;
use crate::model::{Entry, EntryStore, Trip};
use crate::recorder::AudioBlob;
use crate::storage::ObjectStore;

/// Commits finished recordings.
///
/// Identity is checked before the upload, so a rejected save never leaves
/// an orphaned object behind. The in-flight flag mirrors the UI's
/// disabled save controls: a second save while one is running fails fast,
/// and the flag clears on every exit so the caller can retry.
pub struct SaveFlow {
    store: Arc<dyn EntryStore>,
    objects: Arc<dyn ObjectStore>,
    saving: AtomicBool,
}

impl SaveFlow {
    pub fn new(store: Arc<dyn EntryStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            objects,
            saving: AtomicBool::new(false),
        }
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Attach the blob to an existing trip: upload, resolve the public
    /// URL, insert the entry (status `pending`, dated today).
    pub async fn attach_to_trip(
        &self,
        identity: Option<&Identity>,
        trip_id: Uuid,
        blob: &AudioBlob,
    ) -> Result<Entry, SaveError> {
        let _guard = self.begin()?;
        let identity = identity.ok_or(SaveError::NotAuthenticated)?;
        self.attach(identity, trip_id, blob).await
    }

    /// Create a trip titled `title` (trimmed, non-empty), then attach the
    /// blob to it. If trip creation fails nothing is uploaded.
    pub async fn create_trip_and_attach(
        &self,
        identity: Option<&Identity>,
        title: &str,
        blob: &AudioBlob,
    ) -> Result<(Trip, Entry), SaveError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SaveError::EmptyTripTitle);
        }

        let _guard = self.begin()?;
        let identity = identity.ok_or(SaveError::NotAuthenticated)?;

        let trip = self
            .store
            .insert_trip(Trip::new(title, identity.user_id))
            .await
            .map_err(SaveError::TripCreateFailed)?;

        let entry = self.attach(identity, trip.id, blob).await?;
        Ok((trip, entry))
    }

    async fn attach(
        &self,
        identity: &Identity,
        trip_id: Uuid,
        blob: &AudioBlob,
    ) -> Result<Entry, SaveError> {
        let key = object_key(identity);

        self.objects
            .upload(&key, blob.bytes.clone(), blob.mime)
            .await
            .map_err(SaveError::UploadFailed)?;

        let audio_url = self.objects.public_url(&key);

        let entry = Entry::new(
            trip_id,
            audio_url,
            blob.mime,
            Local::now().date_naive(),
            identity.user_id,
        );

        let entry = self
            .store
            .insert_entry(entry)
            .await
            .map_err(SaveError::EntryCreateFailed)?;

        info!("entry {} saved to trip {}", entry.id, trip_id);
        Ok(entry)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SaveError> {
        if self
            .saving
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SaveError::SaveInProgress);
        }
        Ok(InFlightGuard(&self.saving))
    }
}

/// Unique per user and per save-time, so concurrent users and rapid
/// successive saves never collide.
fn object_key(identity: &Identity) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{}/{}.webm", identity.user_id, nanos)
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
